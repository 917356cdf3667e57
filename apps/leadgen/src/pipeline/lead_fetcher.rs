//! Lead Fetcher — maps a `FilterSet` onto a provider query and returns raw leads.
//!
//! Failure policy: every upstream failure (transport, non-200, malformed
//! payload) resolves to an empty list. Nothing is raised past this boundary.

use tracing::{info, warn};

use crate::models::filters::FilterSet;
use crate::models::lead::RawLead;
use crate::search_client::{LeadSearchProvider, SearchQuery};

pub const DEFAULT_KEYWORD: &str = "Software Engineer";
pub const DEFAULT_LOCATION: &str = "United States";
pub const SEARCH_LIMIT: u32 = 10;
const TIME_RANGE: &str = "Past month";
const JOB_TYPE: &str = "Full-time";

/// Builds the provider query. Empty role and industry fall back to a generic
/// job title so the provider never receives an empty keyword.
pub fn build_query(filters: &FilterSet, country: &str) -> SearchQuery {
    let keyword = format!("{} {}", filters.role.trim(), filters.industry.trim())
        .trim()
        .to_string();
    let location = filters.location.trim();

    SearchQuery {
        query: if keyword.is_empty() {
            DEFAULT_KEYWORD.to_string()
        } else {
            keyword
        },
        location: if location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location.to_string()
        },
        country: country.to_string(),
        limit: SEARCH_LIMIT,
        time_range: TIME_RANGE.to_string(),
        job_type: JOB_TYPE.to_string(),
    }
}

pub async fn fetch_leads(
    filters: &FilterSet,
    country: &str,
    search: &dyn LeadSearchProvider,
) -> Vec<RawLead> {
    let query = build_query(filters, country);

    match search.search(&query).await {
        Ok(leads) => {
            info!(
                query = %query.query,
                location = %query.location,
                "Fetched {} leads",
                leads.len()
            );
            leads
        }
        Err(e) => {
            warn!(query = %query.query, "Lead search failed, returning no leads: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{numbered_leads, ScriptedSearch};
    use crate::search_client::SearchError;

    fn filters(role: &str, industry: &str, location: &str) -> FilterSet {
        FilterSet {
            role: role.to_string(),
            industry: industry.to_string(),
            location: location.to_string(),
            other_requirements: String::new(),
        }
    }

    #[test]
    fn test_query_combines_role_and_industry() {
        let query = build_query(&filters("Marketing Manager", "Fintech", "Kenya"), "US");
        assert_eq!(query.query, "Marketing Manager Fintech");
        assert_eq!(query.location, "Kenya");
        assert_eq!(query.country, "US");
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_empty_role_and_industry_use_default_keyword() {
        for (role, industry) in [("", ""), ("  ", ""), ("", "   ")] {
            let query = build_query(&filters(role, industry, "Kenya"), "US");
            assert_eq!(query.query, DEFAULT_KEYWORD);
        }
    }

    #[test]
    fn test_single_field_has_no_stray_whitespace() {
        assert_eq!(build_query(&filters("CTO", "", ""), "US").query, "CTO");
        assert_eq!(build_query(&filters("", "Retail", ""), "US").query, "Retail");
    }

    #[test]
    fn test_empty_location_uses_default() {
        let query = build_query(&filters("CTO", "", ""), "KE");
        assert_eq!(query.location, DEFAULT_LOCATION);
        assert_eq!(query.country, "KE");
    }

    #[tokio::test]
    async fn test_fetch_returns_provider_leads() {
        let search = ScriptedSearch::new(vec![numbered_leads(3)]);
        let leads = fetch_leads(&filters("CTO", "SaaS", "Berlin"), "US", &search).await;

        assert_eq!(leads.len(), 3);
        assert_eq!(search.calls(), 1);
        assert_eq!(search.queries()[0].query, "CTO SaaS");
    }

    #[tokio::test]
    async fn test_fetch_failure_resolves_to_empty() {
        let search = ScriptedSearch::failing(SearchError::Api {
            status: 401,
            message: "bad token".to_string(),
        });
        let leads = fetch_leads(&FilterSet::default(), "US", &search).await;

        assert!(leads.is_empty());
        assert_eq!(search.queries()[0].query, DEFAULT_KEYWORD);
    }
}
