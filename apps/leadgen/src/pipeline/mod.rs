// Lead pipeline: filter parsing → fetch (with retries) → enrichment → cards.
// All model calls go through llm_client, all search calls through search_client.

pub mod enricher;
pub mod filter_parser;
pub mod handlers;
pub mod lead_fetcher;
pub mod presentation;
pub mod prompts;
pub mod providers;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_support;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::models::chat::ChatTurn;
use crate::models::filters::FilterSet;
use crate::models::lead::EnrichedLead;
use crate::pipeline::enricher::enrich_leads;
use crate::pipeline::filter_parser::parse_filters;
use crate::pipeline::retry::{fetch_with_retries, AttemptRecord, RetryState};
use crate::search_client::LeadSearchProvider;
use crate::session::ChatSession;

pub const NO_QUERY_MESSAGE: &str = "Please enter a query in the chat first!";

/// Knobs that come from configuration rather than from the request.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_attempts: u32,
    pub country: String,
}

/// Everything one pipeline run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub query: String,
    pub filters: FilterSet,
    pub state: RetryState,
    pub attempts: Vec<AttemptRecord>,
    pub leads: Vec<EnrichedLead>,
    /// Stage-by-stage status lines, in the order they happened.
    pub status: Vec<String>,
    /// The assistant's closing chat message.
    pub message: String,
}

/// Runs the pipeline on the session's most recent user turn and records the
/// outcome as an assistant turn.
pub async fn run_pipeline(
    session: &mut ChatSession,
    llm: &dyn CompletionProvider,
    search: &dyn LeadSearchProvider,
    settings: &PipelineSettings,
) -> Result<PipelineReport, AppError> {
    let query = session
        .latest_user_turn()
        .map(|turn| turn.content.clone())
        .ok_or_else(|| AppError::Validation(NO_QUERY_MESSAGE.to_string()))?;

    let report = generate_leads(&query, llm, search, settings).await;
    session.append(ChatTurn::assistant(report.message.clone()));
    Ok(report)
}

/// Parse → fetch with retries → enrich, for one query. Never fails: every
/// upstream problem is already degraded by the stage that hit it.
pub async fn generate_leads(
    query: &str,
    llm: &dyn CompletionProvider,
    search: &dyn LeadSearchProvider,
    settings: &PipelineSettings,
) -> PipelineReport {
    info!(query, "Processing lead request");
    let mut status = vec!["Parsing query into filters...".to_string()];
    let filters = parse_filters(query, llm).await;

    status.push("Fetching leads from Bright Data...".to_string());
    let outcome = fetch_with_retries(&filters, settings.max_attempts, &settings.country, search).await;

    let (leads, message) = match outcome.state {
        RetryState::Succeeded { .. } => {
            status.push(format!(
                "Found {} leads. Enriching with AI...",
                outcome.leads.len()
            ));
            let leads = enrich_leads(outcome.leads, query, llm).await;
            status.push("Lead generation complete!".to_string());
            let message = format!("Found {} leads for your query: {query}", leads.len());
            (leads, message)
        }
        RetryState::Exhausted { attempts } | RetryState::Attempting { attempt: attempts } => {
            let message = if attempts > 1 {
                format!("No leads found after {attempts} attempts. Try a broader request.")
            } else {
                "No leads found. Try a broader request.".to_string()
            };
            status.push(message.clone());
            (Vec::new(), message)
        }
    };

    info!(leads = leads.len(), "Lead request finished");

    PipelineReport {
        query: query.to_string(),
        filters,
        state: outcome.state,
        attempts: outcome.attempts,
        leads,
        status,
        message,
    }
}
