use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::{ChatModel, ChatTurnUseCase, CollectionSearch, SessionStore};
use crate::connector::adapter::{InMemorySessionStore, OpenAiChatModel, TePapaSearchClient};

/// Environment variable holding the collection API key.
pub const TE_PAPA_API_KEY_VAR: &str = "TE_PAPA_API_KEY";

pub struct Container {
    chat_model: Arc<dyn ChatModel>,
    collection_search: Arc<dyn CollectionSearch>,
    session_store: Arc<dyn SessionStore>,
}

impl Container {
    /// Wire the production adapters from the environment.
    ///
    /// Fails fast when a required secret is absent so the process never
    /// starts half-configured: `TE_PAPA_API_KEY` and `OPENAI_API_KEY` are
    /// both mandatory.
    pub fn from_env() -> Result<Self> {
        let te_papa_key = std::env::var(TE_PAPA_API_KEY_VAR)
            .with_context(|| format!("{TE_PAPA_API_KEY_VAR} environment variable is not set"))?;

        let chat_model =
            OpenAiChatModel::from_env().context("OPENAI_API_KEY environment variable is not set")?;

        debug!("Container wired with OpenAI chat model and Te Papa search client");
        Ok(Self::with_components(
            Arc::new(chat_model),
            Arc::new(TePapaSearchClient::new(te_papa_key)),
            Arc::new(InMemorySessionStore::new()),
        ))
    }

    /// Wire explicit components. Tests use this to substitute stubs for the
    /// network-facing seams.
    pub fn with_components(
        chat_model: Arc<dyn ChatModel>,
        collection_search: Arc<dyn CollectionSearch>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            chat_model,
            collection_search,
            session_store,
        }
    }

    pub fn chat_turn_use_case(&self) -> ChatTurnUseCase {
        ChatTurnUseCase::new(
            self.chat_model.clone(),
            self.collection_search.clone(),
            self.session_store.clone(),
        )
    }
}
