mod chat_turn;

pub use chat_turn::{search_collection_tool, ChatTurnUseCase, SEARCH_COLLECTION_TOOL};
