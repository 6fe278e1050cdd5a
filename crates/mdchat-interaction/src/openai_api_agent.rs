//! OpenAIApiAgent - Direct REST API implementation for OpenAI Chat Completions.
//!
//! Replays the whole conversation on every request and returns the first
//! choice as an assistant turn.
//! Configuration priority: ~/.config/mdchat/secret.json > environment variables

use async_trait::async_trait;
use mdchat_core::agent::{CompletionAgent, CompletionError};
use mdchat_core::config::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, OpenAIEndpointConfig, SecretConfig,
};
use mdchat_core::conversation::Turn;
use mdchat_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;

/// Agent implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
}

impl OpenAIApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_tokens: None,
        }
    }

    /// Loads credentials from ~/.config/mdchat/secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/mdchat/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `o1` if not specified. A secret.json that
    /// exists but cannot be read or parsed is an error.
    pub fn try_from_env() -> Result<Self, CompletionError> {
        let secret = match SecretStorage::new() {
            Ok(storage) => read_secret(&storage)?,
            Err(err) => {
                tracing::warn!(error = %err, "secret.json location unavailable");
                None
            }
        };

        let (api_key, model) = resolve_credentials(secret, |name| env::var(name).ok())?;
        Ok(Self::new(api_key, model))
    }

    /// Applies the `[openai]` section of config.toml.
    pub fn with_endpoint(mut self, endpoint: &OpenAIEndpointConfig) -> Self {
        self.base_url = endpoint.base_url.clone();
        self.max_tokens = endpoint.max_tokens;
        self
    }

    fn build_request(&self, history: &[Turn]) -> Result<ChatCompletionRequest, CompletionError> {
        if history.is_empty() {
            return Err(CompletionError::ExecutionFailed(
                "OpenAI request must include at least one message".into(),
            ));
        }

        let messages = history
            .iter()
            .map(|turn| ChatMessage {
                role: turn.role.api_name().to_string(),
                content: turn.content.clone(),
            })
            .collect();

        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: self.max_tokens,
        })
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| CompletionError::ProcessError {
                status_code: None,
                message: format!("OpenAI API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            CompletionError::Other(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionAgent for OpenAIApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, history: &[Turn]) -> Result<Turn, CompletionError> {
        let request = self.build_request(history)?;
        tracing::debug!(model = %self.model, messages = history.len(), "sending chat completion");

        let content = self.send_request(&request).await?;
        Ok(Turn::assistant(content))
    }
}

fn read_secret(storage: &SecretStorage) -> Result<Option<SecretConfig>, CompletionError> {
    storage.load().map_err(|err| {
        tracing::warn!(error = %err, "secret.json unusable");
        CompletionError::ExecutionFailed(err.to_string())
    })
}

/// Picks the API key and model from secret.json, falling back to `lookup_env`.
fn resolve_credentials(
    secret: Option<SecretConfig>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<(String, String), CompletionError> {
    if let Some(openai) = secret.and_then(|config| config.openai) {
        if !openai.api_key.trim().is_empty() {
            let model = openai
                .model_name
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
            return Ok((openai.api_key, model));
        }
    }

    let api_key = lookup_env("OPENAI_API_KEY")
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CompletionError::ExecutionFailed(
                "OPENAI_API_KEY not found in ~/.config/mdchat/secret.json or environment variables"
                    .into(),
            )
        })?;
    let model = lookup_env("OPENAI_MODEL_NAME").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());

    Ok((api_key, model))
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            CompletionError::ExecutionFailed(
                "OpenAI API returned no content in the response".into(),
            )
        })
}

fn map_http_error(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    CompletionError::ProcessError {
        status_code: Some(status.as_u16()),
        message: format!("OpenAI API error ({status}): {message}"),
        is_retryable,
    }
}
