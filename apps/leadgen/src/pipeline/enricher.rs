//! Lead Enricher — one completion call per lead, adding a summary, a 1-10
//! relevance score and an outreach suggestion.
//!
//! Invariants:
//! - at most `MAX_ENRICHED_LEADS` leads are enriched (the rest are dropped, not sampled);
//! - exactly one `EnrichedLead` per enriched input, in input order;
//! - a failed or unparseable call yields placeholder values, never a missing record.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{call_json, CompletionProvider};
use crate::models::lead::{EnrichedLead, Enrichment, RawLead};
use crate::pipeline::prompts::{enrich_system, ENRICH_PROMPT_TEMPLATE, ENRICH_TEMPERATURE};

pub const MAX_ENRICHED_LEADS: usize = 10;

pub const PLACEHOLDER_SUMMARY: &str = "Professional with relevant experience in their field";
pub const PLACEHOLDER_SCORE: u8 = 5;
pub const PLACEHOLDER_OUTREACH: &str = "Send LinkedIn message with personalized introduction";

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// What the model sends back. Every field is optional so a partial reply
/// keeps whatever it got right.
#[derive(Debug, Deserialize)]
struct EnrichmentReply {
    #[serde(default, alias = "analysis")]
    summary: Option<String>,
    #[serde(default)]
    score: Option<Value>,
    #[serde(default, alias = "outreach_suggestion")]
    outreach: Option<String>,
}

impl EnrichmentReply {
    fn into_enrichment(self) -> Enrichment {
        Enrichment {
            summary: non_empty_or(self.summary, PLACEHOLDER_SUMMARY),
            score: self
                .score
                .as_ref()
                .and_then(normalize_score)
                .unwrap_or(PLACEHOLDER_SCORE),
            outreach: non_empty_or(self.outreach, PLACEHOLDER_OUTREACH),
        }
    }
}

pub fn placeholder_enrichment() -> Enrichment {
    Enrichment {
        summary: PLACEHOLDER_SUMMARY.to_string(),
        score: PLACEHOLDER_SCORE,
        outreach: PLACEHOLDER_OUTREACH.to_string(),
    }
}

pub async fn enrich_leads(
    leads: Vec<RawLead>,
    original_query: &str,
    llm: &dyn CompletionProvider,
) -> Vec<EnrichedLead> {
    let total = leads.len().min(MAX_ENRICHED_LEADS);
    if leads.len() > MAX_ENRICHED_LEADS {
        info!(
            "Truncating {} leads to the first {MAX_ENRICHED_LEADS}",
            leads.len()
        );
    }

    let system = enrich_system();
    let mut enriched = Vec::with_capacity(total);

    for (i, lead) in leads.into_iter().take(MAX_ENRICHED_LEADS).enumerate() {
        info!("Analyzing lead {} of {total}...", i + 1);

        let prompt = build_enrich_prompt(&lead, original_query);
        let enrichment =
            match call_json::<EnrichmentReply>(llm, &prompt, &system, ENRICH_TEMPERATURE).await {
                Ok(reply) => reply.into_enrichment(),
                Err(e) => {
                    warn!("Enrichment failed for lead {}, using placeholders: {e}", i + 1);
                    placeholder_enrichment()
                }
            };

        enriched.push(EnrichedLead::new(lead, enrichment));
    }

    enriched
}

fn build_enrich_prompt(lead: &RawLead, original_query: &str) -> String {
    ENRICH_PROMPT_TEMPLATE
        .replace("{query}", original_query)
        .replace("{title}", lead.title().unwrap_or("Unknown"))
        .replace("{company}", lead.company().unwrap_or("Unknown"))
        .replace("{location}", lead.location().unwrap_or("Unknown"))
}

/// Raw values at or above this are read as a 1-100 score. Anything between
/// `MAX_SCORE` and this is an overshoot on the 1-10 scale and clamps to 10.
const HUNDRED_SCALE_FLOOR: f64 = 20.0;

/// Accepts a number or numeric string (`"7"`, `"7/10"`, `"85/100"`). Values on
/// a 1-100 scale are mapped down to 1-10; the result is rounded and clamped.
fn normalize_score(value: &Value) -> Option<u8> {
    let (raw, out_of_hundred) = match value {
        Value::Number(n) => (n.as_f64()?, false),
        Value::String(s) => parse_score_text(s)?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    let scaled = if out_of_hundred || (HUNDRED_SCALE_FLOOR..=100.0).contains(&raw) {
        raw / 10.0
    } else {
        raw
    };
    Some(scaled.round().clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8)
}

/// Parses `"N"`, `"N/10"` or `"N/100"`, reporting whether the 1-100 scale was named.
fn parse_score_text(text: &str) -> Option<(f64, bool)> {
    let text = text.trim();
    let (number, out_of_hundred) = if let Some(n) = text.strip_suffix("/100") {
        (n, true)
    } else if let Some(n) = text.strip_suffix("/10") {
        (n, false)
    } else {
        (text, false)
    };
    number.trim().parse::<f64>().ok().map(|n| (n, out_of_hundred))
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
