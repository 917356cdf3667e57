// All LLM prompt constants for the lead pipeline.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SUFFIX;

/// Sampling temperature for filter extraction. Zero keeps repeated parses of
/// the same request stable in aggregate.
pub const FILTER_PARSE_TEMPERATURE: f32 = 0.0;

/// Sampling temperature for enrichment. Plausibility matters here, not reproducibility.
pub const ENRICH_TEMPERATURE: f32 = 0.5;

pub fn filter_parse_system() -> String {
    format!(
        "You are an expert lead generation assistant. \
        Convert lead search requests into structured search parameters. {JSON_ONLY_SUFFIX}"
    )
}

/// Filter extraction prompt template. Replace `{query}` before sending.
pub const FILTER_PARSE_PROMPT_TEMPLATE: &str = r#"Convert this lead search request into structured JSON filters:
"{query}"

Extract:
- role: the job title or role being targeted
- industry: the industry or sector of the companies
- location: the city, country or region
- other_requirements: anything else the request asks for (empty string if nothing)

Return only valid JSON in this format:
{
  "role": "Marketing Manager",
  "industry": "Fintech",
  "location": "Kenya",
  "other_requirements": ""
}"#;

pub fn enrich_system() -> String {
    format!(
        "You enrich leads for sales teams. Analyze each lead against the \
        original request and suggest how to reach out. {JSON_ONLY_SUFFIX}"
    )
}

/// Enrichment prompt template. Replace `{query}`, `{title}`, `{company}` and
/// `{location}` before sending.
pub const ENRICH_PROMPT_TEMPLATE: &str = r#"Based on the original request "{query}", analyze this lead and return JSON with:
- summary (1 sentence about their background)
- score (1-10 relevance score as integer, how well this lead matches the request)
- outreach (best way to contact them, personalized)

Lead: {title} at {company}, Location: {location}

Return only valid JSON in this format:
{
  "summary": "Professional summary here",
  "score": 8,
  "outreach": "Suggested outreach method"
}"#;
