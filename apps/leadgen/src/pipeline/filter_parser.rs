//! Filter Parser — turns a free-text lead request into a `FilterSet`.
//!
//! Never fails: a failed call or an unparseable reply falls back to a keyword
//! heuristic so the pipeline keeps going with degraded filters.

use tracing::{info, warn};

use crate::llm_client::{call_json, CompletionProvider};
use crate::models::filters::FilterSet;
use crate::pipeline::prompts::{
    filter_parse_system, FILTER_PARSE_PROMPT_TEMPLATE, FILTER_PARSE_TEMPERATURE,
};

pub async fn parse_filters(query: &str, llm: &dyn CompletionProvider) -> FilterSet {
    let prompt = FILTER_PARSE_PROMPT_TEMPLATE.replace("{query}", query);

    match call_json::<FilterSet>(llm, &prompt, &filter_parse_system(), FILTER_PARSE_TEMPERATURE)
        .await
    {
        Ok(filters) => {
            info!(
                role = %filters.role,
                industry = %filters.industry,
                location = %filters.location,
                "Parsed search filters"
            );
            filters
        }
        Err(e) => {
            warn!("Filter parsing failed, falling back to keyword heuristic: {e}");
            heuristic_filters(query)
        }
    }
}

/// Keyword heuristic used when the model cannot produce filters.
pub fn heuristic_filters(query: &str) -> FilterSet {
    let lower = query.to_lowercase();
    let mentions_us = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "us" || word == "usa");

    FilterSet {
        role: if lower.contains("marketing") {
            "marketing manager"
        } else {
            "professional"
        }
        .to_string(),
        industry: if lower.contains("fintech") {
            "fintech"
        } else {
            "technology"
        }
        .to_string(),
        location: if mentions_us {
            "United States"
        } else {
            "Worldwide"
        }
        .to_string(),
        other_requirements: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::pipeline::test_support::ScriptedLlm;

    const KENYA_QUERY: &str = "Find marketing managers in fintech companies in Kenya";

    #[tokio::test]
    async fn test_fenced_reply_parses_to_exact_filters() {
        let llm = ScriptedLlm::new([
            "```json\n{\"role\":\"Marketing Manager\",\"industry\":\"Fintech\",\"location\":\"Kenya\"}\n```",
        ]);

        let filters = parse_filters(KENYA_QUERY, &llm).await;

        assert_eq!(
            filters,
            FilterSet {
                role: "Marketing Manager".to_string(),
                industry: "Fintech".to_string(),
                location: "Kenya".to_string(),
                other_requirements: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_prompt_embeds_query_at_zero_temperature() {
        let llm = ScriptedLlm::new([r#"{"role": "CTO"}"#]);
        parse_filters(KENYA_QUERY, &llm).await;

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains(KENYA_QUERY));
        assert_eq!(prompts[0].1, 0.0);
    }

    #[tokio::test]
    async fn test_malformed_replies_fall_back_to_heuristic() {
        for reply in [
            "Sure, I can help with that!",
            "{\"role\": \"Marketing Manager\", \"industry\":",
            "```json\n[1, 2, 3]\n```",
            "",
        ] {
            let llm = ScriptedLlm::new([reply]);
            let filters = parse_filters(KENYA_QUERY, &llm).await;
            assert_eq!(filters, heuristic_filters(KENYA_QUERY), "reply: {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_call_failure_falls_back_to_heuristic() {
        let llm = ScriptedLlm::default();
        llm.push_error(LlmError::Api {
            status: 500,
            message: "upstream down".to_string(),
        });

        let filters = parse_filters(KENYA_QUERY, &llm).await;
        assert_eq!(filters.role, "marketing manager");
        assert_eq!(filters.industry, "fintech");
    }

    #[test]
    fn test_heuristic_marketing_fintech() {
        let filters = heuristic_filters(KENYA_QUERY);
        assert_eq!(filters.role, "marketing manager");
        assert_eq!(filters.industry, "fintech");
        assert_eq!(filters.location, "Worldwide");
        assert_eq!(filters.other_requirements, KENYA_QUERY);
    }

    #[test]
    fn test_heuristic_defaults() {
        let filters = heuristic_filters("Find engineers");
        assert_eq!(filters.role, "professional");
        assert_eq!(filters.industry, "technology");
        assert_eq!(filters.location, "Worldwide");
    }

    #[test]
    fn test_heuristic_us_matches_whole_words_only() {
        assert_eq!(
            heuristic_filters("Sales leads in the USA").location,
            "United States"
        );
        assert_eq!(heuristic_filters("CTOs in the US").location, "United States");
        assert_eq!(
            heuristic_filters("Business owners in Austria").location,
            "Worldwide"
        );
    }
}
