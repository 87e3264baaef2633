//! OpenAI-compatible chat-completions client.
//!
//! Structured requests are sent with a strict `json_schema` response format
//! derived from the declared [`OutputShape`]; free-text requests are sent
//! without one.

use crate::review::ports::{
    CompletionOutput, CompletionRequest, ModelError, ModelResult, ModelService, OutputShape,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone, PartialEq)]
pub struct ModelSettings {
    /// Full chat-completions URL.
    pub endpoint: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Model service backed by an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleModel {
    client: reqwest::Client,
    settings: ModelSettings,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchema,
}

#[derive(Debug, Serialize)]
struct JsonSchema {
    name: &'static str,
    strict: bool,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiCompatibleModel {
    /// Creates a model client that shares the given HTTP client.
    #[must_use]
    pub const fn new(client: reqwest::Client, settings: ModelSettings) -> Self {
        Self { client, settings }
    }

    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        let response_format = request.shape().map(|shape| ResponseFormat {
            format_type: "json_schema",
            json_schema: JsonSchema {
                name: shape.name(),
                strict: true,
                schema: shape.json_schema(),
            },
        });

        ChatRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: request.prompt(),
            }],
            response_format,
        }
    }
}

#[async_trait]
impl ModelService for OpenAiCompatibleModel {
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<CompletionOutput> {
        let body = self.build_request(request);
        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ModelError::Invocation(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ModelError::Invocation(format!(
                "model endpoint returned {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Invocation(format!("unreadable model response: {err}")))?;
        let content = first_content(parsed)?;
        debug!(
            model = %self.settings.model,
            shape = request.shape().map(OutputShape::name),
            chars = content.len(),
            "model completion received"
        );

        match request.shape() {
            Some(shape) => parse_structured(&content, shape).map(CompletionOutput::Structured),
            None => Ok(CompletionOutput::Text(content)),
        }
    }
}

fn first_content(response: ChatResponse) -> ModelResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ModelError::Invocation("model response contained no content".to_owned()))
}

/// Parses a structured completion, tolerating a Markdown code fence.
fn parse_structured(content: &str, shape: OutputShape) -> ModelResult<Value> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|inner| inner.strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(unfenced.trim()).map_err(|err| ModelError::parse(shape, err))
}
