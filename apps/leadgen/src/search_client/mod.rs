//! Lead-search client — the single point of entry for all calls to the
//! profile search provider (Bright Data datasets search).
//!
//! Request:  `POST {search_url}` with `Authorization: Bearer <key>` and body
//!           `{query, location, country, limit, time_range, job_type}`.
//! Response: `{"data": [ {..provider-defined lead..}, .. ]}` on HTTP 200.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::lead::RawLead;

pub const DEFAULT_SEARCH_URL: &str = "https://api.brightdata.com/datasets/v1/search";
pub const DEFAULT_COUNTRY: &str = "US";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed search payload: {0}")]
    Malformed(String),
}

/// The provider-side query built from a `FilterSet`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub location: String,
    pub country: String,
    pub limit: u32,
    pub time_range: String,
    pub job_type: String,
}

/// Anything that can turn a search query into raw leads.
/// Production uses `BrightDataClient`; tests use in-memory stubs.
#[async_trait]
pub trait LeadSearchProvider: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawLead>, SearchError>;
}

#[derive(Clone)]
pub struct BrightDataClient {
    client: Client,
    api_key: String,
    url: String,
}

impl BrightDataClient {
    pub fn new(api_key: String, url: &str) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl LeadSearchProvider for BrightDataClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawLead>, SearchError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Malformed(e.to_string()))?;
        let leads = parse_search_payload(body)?;
        debug!("Search returned {} leads", leads.len());
        Ok(leads)
    }
}

/// Extracts the `data` array from a search response. A missing `data` key
/// means no results; a `data` that is not an array is malformed.
fn parse_search_payload(body: Value) -> Result<Vec<RawLead>, SearchError> {
    let Value::Object(mut map) = body else {
        return Err(SearchError::Malformed(
            "response body is not a JSON object".to_string(),
        ));
    };

    match map.remove("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter(Value::is_object)
            .map(RawLead::from)
            .collect()),
        Some(other) => Err(SearchError::Malformed(format!(
            "expected `data` to be an array, got {other}"
        ))),
    }
}
