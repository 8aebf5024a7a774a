//! Anthropic client implementation
//!
//! Async HTTP client for the Anthropic Messages API with tool calling.
//! The credential is held by the client instance; nothing is read from or
//! written to the process environment here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{Config, Credential, Message, Result, SupaBrowserError, ToolCall, ToolDefinition};
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    credential: Credential,
    max_tokens: u32,
}

/// Messages API request
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Anthropic message format
#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Messages API response
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

/// A content block in a response
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl AnthropicClient {
    /// Create a client for the given credential using configured endpoint settings
    pub fn from_config(config: &Config, credential: Credential) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.anthropic.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.anthropic.base_url.trim_end_matches('/').to_string(),
            credential,
            max_tokens: config.anthropic.max_tokens,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request body, lifting system messages into the `system` field
    fn build_request<'a>(
        &self,
        model: &'a str,
        messages: &'a [Message],
        tools: Option<&'a [ToolDefinition]>,
        options: Option<GenerateOptions>,
    ) -> MessagesRequest<'a> {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.is_system())
            .map(|m| m.content.as_str())
            .collect();

        let options = options.unwrap_or_default();

        MessagesRequest {
            model,
            max_tokens: self.max_tokens,
            system: if system.is_empty() {
                None
            } else {
                Some(system.join("\n\n"))
            },
            messages: messages
                .iter()
                .filter(|m| !m.is_system())
                .map(|m| AnthropicMessage {
                    role: &m.role,
                    content: &m.content,
                })
                .collect(),
            tools: tools.filter(|t| !t.is_empty()),
            temperature: options.temperature,
        }
    }

    /// Convert an API response to LLMResponse
    fn to_llm_response(response: MessagesResponse) -> LLMResponse {
        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for block in response.content {
            match block {
                ContentBlock::Text { text } => content.push_str(&text),
                ContentBlock::ToolUse { name, input } => {
                    tool_calls.push(ToolCall::new(name, input))
                }
                ContentBlock::Unknown => {}
            }
        }

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        });

        LLMResponse {
            content,
            tool_calls,
            usage,
            model: response.model,
            stop_reason: response.stop_reason,
        }
    }

    /// Turn a non-2xx body into a readable message
    fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(e) => format!("{} ({}): {}", status, e.error.kind, e.error.message),
            Err(_) => format!("{}: {}", status, body),
        }
    }

    async fn send(&self, request: &MessagesRequest<'_>) -> Result<LLMResponse> {
        tracing::debug!(
            model = request.model,
            messages = request.messages.len(),
            tools = request.tools.map(|t| t.len()).unwrap_or(0),
            "Sending Anthropic request"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.credential.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SupaBrowserError::anthropic(format!(
                        "Cannot connect to {}",
                        self.base_url
                    ))
                } else if e.is_timeout() {
                    SupaBrowserError::anthropic("Request timed out")
                } else {
                    SupaBrowserError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SupaBrowserError::anthropic(Self::describe_error(
                status,
                &error_text,
            )));
        }

        let response_text = response.text().await?;
        let parsed: MessagesResponse = serde_json::from_str(&response_text).map_err(|e| {
            SupaBrowserError::anthropic(format!("Failed to parse response: {}", e))
        })?;

        let llm_response = Self::to_llm_response(parsed);
        if let Some(ref usage) = llm_response.usage {
            tracing::debug!(
                input_tokens = usage.prompt_tokens,
                output_tokens = usage.completion_tokens,
                tool_calls = llm_response.tool_calls.len(),
                "Anthropic response received"
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl LLMProvider for AnthropicClient {
    async fn chat_with_tools(
        &self,
        model: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        let request = self.build_request(model, messages, Some(tools), options);
        self.send(&request).await
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
