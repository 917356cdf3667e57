//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! Pipeline stages talk to a `CompletionProvider`; `LlmClient` is the HTTP one.
//!
//! No per-call retry: a failed call goes back to the caller, which degrades
//! to its own fallback value.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl CompletionResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// A source of chat completions: one system instruction, one user prompt,
/// one text reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str, temperature: f32)
        -> Result<String, LlmError>;
}

/// HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str, model: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Makes a raw call to the completion API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Result<CompletionResponse, LlmError> {
        let request_body = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: system,
                },
                CompletionMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, temperature).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Calls the provider and deserializes the reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn call_json<T: DeserializeOwned>(
    llm: &dyn CompletionProvider,
    prompt: &str,
    system: &str,
    temperature: f32,
) -> Result<T, LlmError> {
    let text = llm.complete(prompt, system, temperature).await?;
    decode_json(&text)
}

/// Strips code fences from model output and decodes the rest strictly.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Prose before the opening fence or after the closing one is dropped.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(open) = text.find("```") else {
        return text;
    };
    let inner = &text[open + 3..];
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    match inner.find("```") {
        Some(close) => inner[..close].trim(),
        None => inner.trim(),
    }
}
