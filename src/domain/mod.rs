mod error;
mod models;

pub use error::DomainError;
pub use models::{
    ChatResponse, ConversationTurn, DateFacet, Role, SearchQuery, SearchRecord, SearchResult,
    NO_RESPONSE_CONTENT,
};
