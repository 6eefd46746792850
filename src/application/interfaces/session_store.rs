use async_trait::async_trait;

use crate::domain::ConversationTurn;

/// Ordered per-session turn logs.
///
/// Replaces a process-wide shared conversation list with explicit sessions:
/// each session ID owns its own ordered sequence of turns, and the store is
/// responsible for isolation between concurrent callers. Sessions live for
/// the process lifetime only.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append one turn to the session, creating the session if needed.
    async fn append(&self, session_id: &str, turn: ConversationTurn);

    /// Snapshot the session's turns in append order. Unknown sessions yield
    /// an empty log.
    async fn turns(&self, session_id: &str) -> Vec<ConversationTurn>;
}
