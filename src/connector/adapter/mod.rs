mod openai_client;
mod session_store;
mod te_papa_client;

pub use openai_client::OpenAiChatModel;
pub use session_store::InMemorySessionStore;
pub use te_papa_client::TePapaSearchClient;
