mod chat_model;
mod collection_search;
mod session_store;

pub use chat_model::{ChatCompletion, ChatModel, ToolDefinition, ToolInvocation};
pub use collection_search::CollectionSearch;
pub use session_store::SessionStore;
