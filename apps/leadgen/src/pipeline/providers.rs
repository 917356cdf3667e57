//! Builds the external-service clients for one pipeline run.
//!
//! Keys can arrive per request (the client's sidebar fields) or from the
//! environment, so clients are built on demand rather than once at startup.
//! `AppState` holds an `Arc<dyn ProviderFactory>`; tests swap in stubs.

use std::sync::Arc;

use anyhow::Context;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::search_client::{BrightDataClient, LeadSearchProvider};

pub trait ProviderFactory: Send + Sync {
    fn completion(&self, api_key: String) -> Result<Arc<dyn CompletionProvider>, AppError>;
    fn search(&self, api_key: String) -> Result<Arc<dyn LeadSearchProvider>, AppError>;
}

/// Production factory: HTTP clients pointed at the configured endpoints.
pub struct HttpProviders {
    base_url: String,
    model: String,
    search_url: String,
}

impl HttpProviders {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            search_url: config.search_url.clone(),
        }
    }
}

impl ProviderFactory for HttpProviders {
    fn completion(&self, api_key: String) -> Result<Arc<dyn CompletionProvider>, AppError> {
        let client = LlmClient::new(api_key, &self.base_url, &self.model)
            .context("Failed to build LLM client")?;
        Ok(Arc::new(client))
    }

    fn search(&self, api_key: String) -> Result<Arc<dyn LeadSearchProvider>, AppError> {
        let client = BrightDataClient::new(api_key, &self.search_url)
            .context("Failed to build lead search client")?;
        Ok(Arc::new(client))
    }
}

/// Picks the request-supplied key over the configured one; blank counts as absent.
pub fn resolve_key(from_request: Option<String>, from_config: Option<&str>) -> Option<String> {
    from_request
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| from_config.map(str::to_string))
}
