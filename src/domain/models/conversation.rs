use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SearchRecord;

/// Fallback reply when the model produced neither text nor a tool call.
pub const NO_RESPONSE_CONTENT: &str = "No response content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One prior turn of the conversation, replayed to the model on every request
/// to provide context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The combined answer for one inbound message: assistant-visible text plus
/// the raw records of the search the model requested, if any.
///
/// `text` is never empty; when the model returned no content it falls back to
/// [`NO_RESPONSE_CONTENT`]. `issued_query` echoes the exact request body sent
/// to the collection API and is `None` when no search was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    text: String,
    records: Vec<SearchRecord>,
    issued_query: Option<Value>,
}

impl ChatResponse {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: non_empty_or_fallback(text.into()),
            records: Vec::new(),
            issued_query: None,
        }
    }

    pub fn with_search(
        text: impl Into<String>,
        records: Vec<SearchRecord>,
        issued_query: Value,
    ) -> Self {
        Self {
            text: non_empty_or_fallback(text.into()),
            records,
            issued_query: Some(issued_query),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn issued_query(&self) -> Option<&Value> {
        self.issued_query.as_ref()
    }
}

fn non_empty_or_fallback(text: String) -> String {
    if text.is_empty() {
        NO_RESPONSE_CONTENT.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_falls_back() {
        let response = ChatResponse::text_only("");
        assert_eq!(response.text(), NO_RESPONSE_CONTENT);
    }

    #[test]
    fn non_empty_text_is_preserved() {
        let response = ChatResponse::text_only("Here are some portraits.");
        assert_eq!(response.text(), "Here are some portraits.");
    }

    #[test]
    fn text_only_has_no_issued_query() {
        let response = ChatResponse::text_only("hi");
        assert!(response.records().is_empty());
        assert!(response.issued_query().is_none());
    }
}
