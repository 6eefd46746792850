mod interfaces;
mod use_cases;

pub use interfaces::{
    ChatCompletion, ChatModel, CollectionSearch, SessionStore, ToolDefinition, ToolInvocation,
};
pub use use_cases::{search_collection_tool, ChatTurnUseCase, SEARCH_COLLECTION_TOOL};
