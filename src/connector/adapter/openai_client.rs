use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::application::{ChatCompletion, ChatModel, ToolDefinition, ToolInvocation};
use crate::domain::{ConversationTurn, DomainError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Chat-completions API request payload.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    tools: Vec<Value>,
    n: u8,
    stream: bool,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiAssistantMessage,
}

#[derive(Deserialize)]
struct ApiAssistantMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ApiToolCall>,
}

#[derive(Deserialize)]
struct ApiToolCall {
    function: ApiFunctionCall,
}

#[derive(Deserialize)]
struct ApiFunctionCall {
    name: String,
    /// JSON-encoded argument string, exactly as the provider returns it.
    arguments: String,
}

/// A [`ChatModel`] backed by the OpenAI chat-completions API.
///
/// Requests are non-streaming with a single choice; the tool declaration is
/// forwarded as one `function`-type entry in the `tools` array. Any transport
/// failure or non-success status maps to [`DomainError::LlmUnavailable`] and
/// is never retried here.
///
/// **API key**: required, from `OPENAI_API_KEY` at construction time.
///
/// **Base URL**: defaults to `https://api.openai.com`. Override with
/// `OPENAI_BASE_URL` to target any OpenAI-compatible server — e.g. a locally
/// running LM Studio instance (`http://localhost:1234`).
pub struct OpenAiChatModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiChatModel {
    /// Create a new client with an explicit API key, model, and endpoint URL.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Convenience constructor that reads configuration from the environment:
    ///
    /// | Variable          | Default                   |
    /// |-------------------|---------------------------|
    /// | `OPENAI_API_KEY`  | required; `None` if absent |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com`  |
    /// | `OPENAI_MODEL`    | `gpt-4o`                  |
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("OPENAI_API_KEY").ok()?;
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(key, model, base))
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        tool: &ToolDefinition,
    ) -> Result<ChatCompletion, DomainError> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(ApiMessage {
            role: "system",
            content: system,
        });
        for turn in turns {
            messages.push(ApiMessage {
                role: turn.role().as_str(),
                content: turn.content(),
            });
        }

        let request = ApiRequest {
            model: &self.model,
            messages,
            tools: vec![json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                }
            })],
            n: 1,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::llm_unavailable(format!("OpenAiChatModel: request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatModel: API returned {status}: {body}");
            return Err(DomainError::llm_unavailable(format!(
                "OpenAiChatModel: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::llm_unavailable(format!(
                "OpenAiChatModel: failed to parse response: {e}"
            ))
        })?;

        let Some(choice) = api_response.choices.into_iter().next() else {
            warn!("OpenAiChatModel: response carried no choices");
            return Ok(ChatCompletion::default());
        };

        let tool_invocations: Vec<ToolInvocation> = choice
            .message
            .tool_calls
            .into_iter()
            .map(|call| ToolInvocation {
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        debug!(
            "OpenAiChatModel: completion with {} tool invocation(s)",
            tool_invocations.len()
        );

        Ok(ChatCompletion {
            content: choice.message.content.unwrap_or_default(),
            tool_invocations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tool_call_response() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "search_collection",
                            "arguments": "{\"query\": \"ships\"}"
                        }
                    }]
                }
            }]
        }"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        let message = &response.choices[0].message;
        assert!(message.content.is_none());
        assert_eq!(message.tool_calls[0].function.name, "search_collection");
        assert_eq!(
            message.tool_calls[0].function.arguments,
            "{\"query\": \"ships\"}"
        );
    }

    #[test]
    fn deserializes_text_only_response() {
        let raw = r#"{
            "choices": [{
                "message": { "content": "Could you narrow that down?" }
            }]
        }"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        let message = &response.choices[0].message;
        assert_eq!(message.content.as_deref(), Some("Could you narrow that down?"));
        assert!(message.tool_calls.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenAiChatModel::new("key", "gpt-4o", "http://localhost:1234/");
        assert_eq!(client.url, "http://localhost:1234/v1/chat/completions");
    }
}
