use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::SessionStore;
use crate::domain::ConversationTurn;

/// Process-lifetime [`SessionStore`] keyed by session ID.
///
/// Each session owns an ordered turn log; the lock keeps concurrent appends
/// from interleaving within a session. Nothing survives a restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Vec<ConversationTurn>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh session identifier for callers that did not supply one.
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append(&self, session_id: &str, turn: ConversationTurn) {
        let mut sessions = self.sessions.lock().await;
        sessions.entry(session_id.to_string()).or_default().push(turn);
    }

    async fn turns(&self, session_id: &str) -> Vec<ConversationTurn> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned().unwrap_or_default()
    }
}
