//! Retry Orchestrator — repeats the lead fetch with progressively wider
//! filters until a search returns something or the attempt budget runs out.
//!
//! States: `Attempting(n)` → `Succeeded` | `Attempting(n + 1)` | `Exhausted`.
//! The filters for attempt `n` come from a fixed table, not from the model.
//! There is no delay between attempts.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::filters::FilterSet;
use crate::models::lead::RawLead;
use crate::pipeline::lead_fetcher::fetch_leads;
use crate::search_client::LeadSearchProvider;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const WIDE_LOCATION: &str = "Worldwide";

/// How the parsed filters are mutated on a given attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryRule {
    AsParsed,
    WidenLocation,
    WidenLocationAndIndustry,
}

/// Attempt n (1-based) uses entry n - 1; later attempts reuse the last entry.
pub const RETRY_TABLE: [RetryRule; 3] = [
    RetryRule::AsParsed,
    RetryRule::WidenLocation,
    RetryRule::WidenLocationAndIndustry,
];

impl RetryRule {
    pub fn for_attempt(attempt: u32) -> Self {
        let index = (attempt.max(1) as usize - 1).min(RETRY_TABLE.len() - 1);
        RETRY_TABLE[index]
    }

    pub fn apply(self, base: &FilterSet) -> FilterSet {
        let mut filters = base.clone();
        match self {
            RetryRule::AsParsed => {}
            RetryRule::WidenLocation => {
                filters.location = WIDE_LOCATION.to_string();
            }
            RetryRule::WidenLocationAndIndustry => {
                filters.location = WIDE_LOCATION.to_string();
                filters.industry.clear();
            }
        }
        filters
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RetryState {
    Attempting { attempt: u32 },
    Succeeded { attempt: u32 },
    Exhausted { attempts: u32 },
}

impl RetryState {
    /// Transition after an attempt that found `found` leads.
    /// Terminal states are absorbing.
    pub fn next(self, found: usize, max_attempts: u32) -> Self {
        match self {
            RetryState::Attempting { attempt } if found > 0 => RetryState::Succeeded { attempt },
            RetryState::Attempting { attempt } if attempt < max_attempts => {
                RetryState::Attempting {
                    attempt: attempt + 1,
                }
            }
            RetryState::Attempting { attempt } => RetryState::Exhausted { attempts: attempt },
            terminal => terminal,
        }
    }
}

/// One row of the attempt trail, reported back to the client in debug mode.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub rule: RetryRule,
    pub filters: FilterSet,
    pub leads_found: usize,
}

#[derive(Debug)]
pub struct RetryOutcome {
    pub state: RetryState,
    pub leads: Vec<RawLead>,
    pub attempts: Vec<AttemptRecord>,
}

pub async fn fetch_with_retries(
    base: &FilterSet,
    max_attempts: u32,
    country: &str,
    search: &dyn LeadSearchProvider,
) -> RetryOutcome {
    let max_attempts = max_attempts.max(1);
    let mut state = RetryState::Attempting { attempt: 1 };
    let mut attempts = Vec::new();

    while let RetryState::Attempting { attempt } = state {
        let rule = RetryRule::for_attempt(attempt);
        let filters = rule.apply(base);
        info!(attempt, max_attempts, ?rule, "Fetching leads");

        let leads = fetch_leads(&filters, country, search).await;
        attempts.push(AttemptRecord {
            attempt,
            rule,
            filters,
            leads_found: leads.len(),
        });

        state = state.next(leads.len(), max_attempts);
        if let RetryState::Succeeded { .. } = state {
            return RetryOutcome {
                state,
                leads,
                attempts,
            };
        }
    }

    warn!("No leads found after {} attempts", attempts.len());
    RetryOutcome {
        state,
        leads: Vec::new(),
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{numbered_leads, ScriptedSearch};

    fn base() -> FilterSet {
        FilterSet {
            role: "Marketing Manager".to_string(),
            industry: "Fintech".to_string(),
            location: "Kenya".to_string(),
            other_requirements: String::new(),
        }
    }

    #[test]
    fn test_rule_table_lookup() {
        assert_eq!(RetryRule::for_attempt(1), RetryRule::AsParsed);
        assert_eq!(RetryRule::for_attempt(2), RetryRule::WidenLocation);
        assert_eq!(RetryRule::for_attempt(3), RetryRule::WidenLocationAndIndustry);
        assert_eq!(RetryRule::for_attempt(7), RetryRule::WidenLocationAndIndustry);
    }

    #[test]
    fn test_rules_mutate_filters() {
        assert_eq!(RetryRule::AsParsed.apply(&base()), base());

        let widened = RetryRule::WidenLocation.apply(&base());
        assert_eq!(widened.location, WIDE_LOCATION);
        assert_eq!(widened.industry, "Fintech");

        let widest = RetryRule::WidenLocationAndIndustry.apply(&base());
        assert_eq!(widest.location, WIDE_LOCATION);
        assert_eq!(widest.industry, "");
        assert_eq!(widest.role, "Marketing Manager");
    }

    #[test]
    fn test_state_transitions() {
        let start = RetryState::Attempting { attempt: 1 };
        assert_eq!(start.next(4, 3), RetryState::Succeeded { attempt: 1 });
        assert_eq!(start.next(0, 3), RetryState::Attempting { attempt: 2 });
        assert_eq!(
            RetryState::Attempting { attempt: 3 }.next(0, 3),
            RetryState::Exhausted { attempts: 3 }
        );
        assert_eq!(
            RetryState::Exhausted { attempts: 3 }.next(5, 3),
            RetryState::Exhausted { attempts: 3 }
        );
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let search = ScriptedSearch::new(vec![vec![], vec![], numbered_leads(2)]);

        let outcome = fetch_with_retries(&base(), 3, "US", &search).await;

        assert_eq!(search.calls(), 3);
        assert_eq!(outcome.state, RetryState::Succeeded { attempt: 3 });
        assert_eq!(outcome.leads.len(), 2);
        assert_eq!(outcome.attempts.len(), 3);

        let queries = search.queries();
        assert_eq!(queries[0].location, "Kenya");
        assert_eq!(queries[1].location, WIDE_LOCATION);
        assert_eq!(queries[2].query, "Marketing Manager");
    }

    #[tokio::test]
    async fn test_stops_at_first_non_empty_result() {
        let search = ScriptedSearch::new(vec![numbered_leads(1), numbered_leads(5)]);

        let outcome = fetch_with_retries(&base(), 3, "US", &search).await;

        assert_eq!(search.calls(), 1);
        assert_eq!(outcome.state, RetryState::Succeeded { attempt: 1 });
        assert_eq!(outcome.leads.len(), 1);
    }

    #[tokio::test]
    async fn test_exhausts_when_always_empty() {
        let search = ScriptedSearch::default();

        let outcome = fetch_with_retries(&base(), 3, "US", &search).await;

        assert_eq!(search.calls(), 3);
        assert_eq!(outcome.state, RetryState::Exhausted { attempts: 3 });
        assert!(outcome.leads.is_empty());
        assert!(outcome.attempts.iter().all(|a| a.leads_found == 0));
    }

    #[tokio::test]
    async fn test_single_attempt_budget() {
        let search = ScriptedSearch::default();

        let outcome = fetch_with_retries(&base(), 1, "US", &search).await;

        assert_eq!(search.calls(), 1);
        assert_eq!(outcome.state, RetryState::Exhausted { attempts: 1 });
    }

    #[tokio::test]
    async fn test_zero_budget_still_attempts_once() {
        let search = ScriptedSearch::default();
        let outcome = fetch_with_retries(&base(), 0, "US", &search).await;
        assert_eq!(search.calls(), 1);
        assert_eq!(outcome.state, RetryState::Exhausted { attempts: 1 });
    }
}
