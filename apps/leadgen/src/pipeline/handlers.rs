//! Axum route handler for the "Generate Leads" action.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::filters::FilterSet;
use crate::pipeline::presentation::{build_cards, LeadCard};
use crate::pipeline::providers::resolve_key;
use crate::pipeline::retry::{AttemptRecord, RetryState};
use crate::pipeline::{run_pipeline, PipelineSettings};
use crate::session::handlers::find_session;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Overrides `OPENAI_API_KEY` for this run.
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Overrides `BRIGHT_DATA_API_KEY` for this run.
    #[serde(default)]
    pub bright_data_api_key: Option<String>,
    /// Include the parsed filters and the attempt trail in the response.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub query: String,
    pub outcome: RetryState,
    pub message: String,
    pub status: Vec<String>,
    pub leads: Vec<LeadCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<Vec<AttemptRecord>>,
}

/// POST /api/v1/sessions/:id/generate
///
/// Runs the lead pipeline on the session's latest user message.
/// The body is optional; without one, keys come from the environment.
/// The session stays locked for the whole run, so runs never overlap.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<GenerateRequest>>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let session = find_session(&state, id).await?;

    let openai_key = resolve_key(request.openai_api_key, state.config.openai_api_key.as_deref())
        .ok_or(AppError::MissingCredential("OpenAI"))?;
    let bright_data_key = resolve_key(
        request.bright_data_api_key,
        state.config.bright_data_api_key.as_deref(),
    )
    .ok_or(AppError::MissingCredential("Bright Data"))?;

    let llm = state.providers.completion(openai_key)?;
    let search = state.providers.search(bright_data_key)?;
    let settings = PipelineSettings {
        max_attempts: state.config.max_attempts,
        country: state.config.search_country.clone(),
    };

    let mut session = session.lock().await;
    let report = run_pipeline(&mut session, llm.as_ref(), search.as_ref(), &settings).await?;

    let (filters, attempts) = if request.debug {
        (Some(report.filters), Some(report.attempts))
    } else {
        (None, None)
    };

    Ok(Json(GenerateResponse {
        leads: build_cards(&report.leads),
        query: report.query,
        outcome: report.state,
        message: report.message,
        status: report.status,
        filters,
        attempts,
    }))
}
