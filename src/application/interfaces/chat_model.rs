use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ConversationTurn, DomainError};

/// A tool the model may invoke instead of (or alongside) free text.
///
/// `parameters` is the JSON-schema shape of the tool's arguments, forwarded
/// verbatim to the provider.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A structured invocation the model chose to emit: the tool's name plus its
/// arguments as the provider's raw JSON-encoded string, left undecoded so the
/// caller controls validation.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: String,
}

/// One non-streaming completion: the model's text (possibly empty) and
/// whatever tool invocations it proposed, in the order it proposed them.
#[derive(Debug, Clone, Default)]
pub struct ChatCompletion {
    pub content: String,
    pub tool_invocations: Vec<ToolInvocation>,
}

/// An interface for requesting one chat completion from an LLM with a tool
/// declaration attached.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. A transport or provider failure is `DomainError::LlmUnavailable`;
/// callers do not retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit a `system` instruction, the prior `turns`, and a single `tool`
    /// declaration; return the model's completion.
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        tool: &ToolDefinition,
    ) -> Result<ChatCompletion, DomainError>;
}
