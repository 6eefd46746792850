pub mod adapter;
pub mod api;

pub use adapter::{InMemorySessionStore, OpenAiChatModel, TePapaSearchClient};
pub use api::{router, Container};
