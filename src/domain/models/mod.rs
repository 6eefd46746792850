mod conversation;
mod date_facet;
mod search;

pub use conversation::{ChatResponse, ConversationTurn, Role, NO_RESPONSE_CONTENT};
pub use date_facet::DateFacet;
pub use search::{SearchQuery, SearchRecord, SearchResult};
