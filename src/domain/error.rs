use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed tool arguments: {0}")]
    MalformedToolArguments(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn malformed_tool_arguments(msg: impl Into<String>) -> Self {
        Self::MalformedToolArguments(msg.into())
    }

    pub fn llm_unavailable(msg: impl Into<String>) -> Self {
        Self::LlmUnavailable(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_llm_unavailable(&self) -> bool {
        matches!(self, Self::LlmUnavailable(_))
    }

    pub fn is_malformed_tool_arguments(&self) -> bool {
        matches!(self, Self::MalformedToolArguments(_))
    }
}
