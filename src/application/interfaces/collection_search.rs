use async_trait::async_trait;

use crate::domain::{SearchQuery, SearchResult};

/// Executes a structured query against the external collection API.
///
/// The contract is deliberately infallible: a remote 4xx/5xx or a transport
/// failure degrades to an empty record set, never to an error, because the
/// assistant's reply is still meaningful with zero results. The returned
/// [`SearchResult`] always carries the exact wire body that was issued (or
/// attempted) so callers can inspect what was asked.
#[async_trait]
pub trait CollectionSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> SearchResult;
}
