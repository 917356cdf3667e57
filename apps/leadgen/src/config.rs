use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::pipeline::retry::DEFAULT_MAX_ATTEMPTS;
use crate::search_client::{DEFAULT_COUNTRY, DEFAULT_SEARCH_URL};

/// Application configuration loaded from environment variables.
///
/// API keys are optional here: the interactive client may supply them per
/// request, and a missing key is reported to the user when a pipeline runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub bright_data_api_key: Option<String>,
    pub search_url: String,
    pub search_country: String,
    pub max_attempts: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_attempts = std::env::var("LEADGEN_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse::<u32>()
            .context("LEADGEN_MAX_ATTEMPTS must be a positive integer")?;
        if max_attempts == 0 {
            bail!("LEADGEN_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            bright_data_api_key: optional_env("BRIGHT_DATA_API_KEY"),
            search_url: optional_env("BRIGHT_DATA_SEARCH_URL")
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            search_country: optional_env("LEAD_SEARCH_COUNTRY")
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            max_attempts,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config used by handler tests; never touches the process environment.
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: Some("sk-test".to_string()),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            bright_data_api_key: Some("bd-test".to_string()),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_country: DEFAULT_COUNTRY.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}
