pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    search_collection_tool, ChatCompletion, ChatModel, ChatTurnUseCase, CollectionSearch,
    SessionStore, ToolDefinition, ToolInvocation, SEARCH_COLLECTION_TOOL,
};

pub use connector::{
    router, Container, InMemorySessionStore, OpenAiChatModel, TePapaSearchClient,
};

pub use domain::{
    ChatResponse, ConversationTurn, DateFacet, DomainError, Role, SearchQuery, SearchRecord,
    SearchResult, NO_RESPONSE_CONTENT,
};
