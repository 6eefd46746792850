use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::application::{
    ChatModel, CollectionSearch, SessionStore, ToolDefinition, ToolInvocation,
};
use crate::domain::{ChatResponse, ConversationTurn, DateFacet, DomainError, SearchQuery};

/// Name of the single tool declared to the model.
pub const SEARCH_COLLECTION_TOOL: &str = "search_collection";

/// Fixed system instruction establishing the assistant's role.
const SYSTEM_PROMPT: &str = "\
You are an expert at querying a museum archive API to find photographic \
records. Always preserve context the user provides, such as place names, and \
carry it into your search queries. Make search queries descriptive rather \
than terse. If the user's request is too broad to search meaningfully, ask \
for clarification instead of guessing.";

/// Arguments of a `search_collection` invocation, decoded from the model's
/// JSON argument string. Unknown keys reject the payload rather than being
/// dropped, so a misshapen call from the model fails loudly.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchArguments {
    query: String,
    date_filter: Option<DateFacet>,
}

/// The closed set of tools the model can invoke. There is exactly one; adding
/// a tool means adding a variant here, not registering a name in a table.
#[derive(Debug)]
enum ToolCall {
    SearchCollection(SearchArguments),
}

impl ToolCall {
    fn parse(invocation: &ToolInvocation) -> Result<Self, DomainError> {
        match invocation.name.as_str() {
            SEARCH_COLLECTION_TOOL => {
                let arguments: SearchArguments = serde_json::from_str(&invocation.arguments)
                    .map_err(|e| {
                        DomainError::malformed_tool_arguments(format!(
                            "could not decode {SEARCH_COLLECTION_TOOL} arguments: {e}"
                        ))
                    })?;

                if arguments.query.trim().is_empty() {
                    return Err(DomainError::malformed_tool_arguments(
                        "query must be a non-empty string",
                    ));
                }

                Ok(Self::SearchCollection(arguments))
            }
            other => Err(DomainError::malformed_tool_arguments(format!(
                "model invoked unknown tool: {other}"
            ))),
        }
    }
}

/// The tool-calling orchestrator: one inbound message, at most one LLM call,
/// at most one collection-API call.
///
/// The protocol is deliberately two-call-maximum. The model is asked once to
/// decide; if it invokes `search_collection` the search runs and its raw
/// records are attached to the response, but the model is never consulted a
/// second time to summarize them. The returned text is the text of the
/// decision turn. Adding a post-search round trip would change observable
/// response content, not just latency.
pub struct ChatTurnUseCase {
    chat_model: Arc<dyn ChatModel>,
    collection_search: Arc<dyn CollectionSearch>,
    session_store: Arc<dyn SessionStore>,
}

impl ChatTurnUseCase {
    pub fn new(
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

    /// Run one conversational turn for `session_id`.
    ///
    /// Fails with `InvalidInput` before any network call when the message is
    /// empty. An LLM failure is fatal (`LlmUnavailable`); a collection-API
    /// failure is not — it degrades to an empty record set inside the search
    /// client.
    pub async fn handle(
        &self,
        session_id: &str,
        user_message: &str,
    ) -> Result<ChatResponse, DomainError> {
        if user_message.trim().is_empty() {
            return Err(DomainError::invalid_input("Message parameter is required"));
        }

        self.session_store
            .append(session_id, ConversationTurn::user(user_message))
            .await;
        let turns = self.session_store.turns(session_id).await;

        info!("Requesting completion ({} prior turns)", turns.len() - 1);
        let tool = search_collection_tool();
        let completion = self
            .chat_model
            .complete(SYSTEM_PROMPT, &turns, &tool)
            .await?;

        let Some(invocation) = completion.tool_invocations.first() else {
            debug!("Model answered without a tool call");
            return Ok(ChatResponse::text_only(completion.content));
        };

        // Only the first invocation is executed; the model occasionally
        // proposes several and the extras are dropped.
        if completion.tool_invocations.len() > 1 {
            debug!(
                "Ignoring {} extra tool invocations",
                completion.tool_invocations.len() - 1
            );
        }

        let ToolCall::SearchCollection(arguments) = ToolCall::parse(invocation)?;

        let mut query = SearchQuery::new(&arguments.query);
        if let Some(facet) = arguments.date_filter {
            query = query.with_facet(facet);
        }

        info!("Model requested collection search: {}", arguments.query);
        let result = self.collection_search.search(&query).await;

        self.session_store
            .append(session_id, ConversationTurn::assistant(completion.content.as_str()))
            .await;

        let (records, issued_query) = result.into_parts();
        Ok(ChatResponse::with_search(
            completion.content,
            records,
            issued_query,
        ))
    }
}

/// Declaration of the `search_collection` tool sent with every completion
/// request. The `date_filter` property names mirror the collection API's
/// dotted facet fields exactly.
pub fn search_collection_tool() -> ToolDefinition {
    ToolDefinition {
        name: SEARCH_COLLECTION_TOOL.to_string(),
        description: "Search the museum's photography collection. Keep the \
                      query descriptive and preserve any location context the \
                      user provided, such as place names."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Descriptive free-text search query, including any user-provided context such as place names"
                },
                "date_filter": {
                    "type": "object",
                    "description": "Optional creation-date narrowing",
                    "properties": {
                        "facetCreatedDate.century": {
                            "type": "string",
                            "description": "Century of creation, e.g. \"19th century\""
                        },
                        "facetCreatedDate.decadeOfCentury": {
                            "type": "string",
                            "description": "Decade of creation, e.g. \"1870s\""
                        },
                        "facetCreatedDate.year": {
                            "type": "string",
                            "description": "Exact year of creation, e.g. \"1877\""
                        }
                    },
                    "additionalProperties": false
                }
            },
            "required": ["query"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(arguments: &str) -> ToolInvocation {
        ToolInvocation {
            name: SEARCH_COLLECTION_TOOL.to_string(),
            arguments: arguments.to_string(),
        }
    }

    #[test]
    fn parses_query_only_arguments() {
        let call = ToolCall::parse(&invocation(r#"{"query": "ships"}"#)).unwrap();
        let ToolCall::SearchCollection(args) = call;
        assert_eq!(args.query, "ships");
        assert!(args.date_filter.is_none());
    }

    #[test]
    fn parses_date_filter_arguments() {
        let call = ToolCall::parse(&invocation(
            r#"{"query": "portraits of Wellington", "date_filter": {"facetCreatedDate.year": "1877"}}"#,
        ))
        .unwrap();
        let ToolCall::SearchCollection(args) = call;
        assert_eq!(args.date_filter.unwrap().year(), Some("1877"));
    }

    #[test]
    fn rejects_invalid_json_arguments() {
        let err = ToolCall::parse(&invocation("not json")).unwrap_err();
        assert!(err.is_malformed_tool_arguments());
    }

    #[test]
    fn rejects_unknown_argument_keys() {
        let err =
            ToolCall::parse(&invocation(r#"{"query": "ships", "page": 2}"#)).unwrap_err();
        assert!(err.is_malformed_tool_arguments());
    }

    #[test]
    fn rejects_unknown_facet_keys() {
        let err = ToolCall::parse(&invocation(
            r#"{"query": "ships", "date_filter": {"facetCreatedDate.month": "July"}}"#,
        ))
        .unwrap_err();
        assert!(err.is_malformed_tool_arguments());
    }

    #[test]
    fn rejects_non_object_date_filter() {
        let err = ToolCall::parse(&invocation(
            r#"{"query": "ships", "date_filter": "1877"}"#,
        ))
        .unwrap_err();
        assert!(err.is_malformed_tool_arguments());
    }

    #[test]
    fn rejects_empty_query() {
        let err = ToolCall::parse(&invocation(r#"{"query": "  "}"#)).unwrap_err();
        assert!(err.is_malformed_tool_arguments());
    }

    #[test]
    fn rejects_unknown_tool_name() {
        let bad = ToolInvocation {
            name: "order_pizza".to_string(),
            arguments: "{}".to_string(),
        };
        let err = ToolCall::parse(&bad).unwrap_err();
        assert!(err.is_malformed_tool_arguments());
    }

    #[test]
    fn tool_declaration_requires_query() {
        let tool = search_collection_tool();
        assert_eq!(tool.name, SEARCH_COLLECTION_TOOL);
        assert_eq!(tool.parameters["required"], serde_json::json!(["query"]));
        assert!(tool.parameters["properties"]["date_filter"]["properties"]
            .get("facetCreatedDate.year")
            .is_some());
    }
}
