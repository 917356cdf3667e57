//! In-memory stand-ins for the two external providers.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::{CompletionProvider, LlmError};
use crate::models::lead::RawLead;
use crate::search_client::{LeadSearchProvider, SearchError, SearchQuery};

/// Replays scripted completions in order. Once the script runs out every
/// call fails with `EmptyContent`.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<(String, f32)>>,
}

impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::default(),
        }
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Every prompt received so far, with the temperature it was sent at.
    pub fn prompts(&self) -> Vec<(String, f32)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedLlm {
    async fn complete(
        &self,
        prompt: &str,
        _system: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Returns one scripted result set per call, recording every query.
/// Calls past the end of the script return no leads.
#[derive(Default)]
pub struct ScriptedSearch {
    results: Mutex<VecDeque<Result<Vec<RawLead>, SearchError>>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl ScriptedSearch {
    pub fn new(results: Vec<Vec<RawLead>>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().map(Ok).collect()),
            queries: Mutex::default(),
        }
    }

    pub fn failing(error: SearchError) -> Self {
        let search = Self::default();
        search.results.lock().unwrap().push_back(Err(error));
        search
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl LeadSearchProvider for ScriptedSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawLead>, SearchError> {
        self.queries.lock().unwrap().push(query.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn raw_lead(value: Value) -> RawLead {
    RawLead::from(value)
}

/// `n` distinct leads titled "Lead 0", "Lead 1", ...
pub fn numbered_leads(n: usize) -> Vec<RawLead> {
    (0..n)
        .map(|i| {
            raw_lead(serde_json::json!({
                "title": format!("Lead {i}"),
                "company": format!("Company {i}"),
                "location": "Nairobi, Kenya"
            }))
        })
        .collect()
}
