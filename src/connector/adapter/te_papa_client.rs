use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::application::CollectionSearch;
use crate::domain::{SearchQuery, SearchRecord, SearchResult};

/// Fixed endpoint of the Te Papa collection search API.
const SEARCH_URL: &str = "https://data.tepapa.govt.nz/collection/search";

/// Boolean clause appended to every query: photography collection only, and
/// an image representation must exist.
const QUERY_SUFFIX: &str = "AND collection:Photography AND _exists_:hasRepresentation";

/// Fixed page size of every search.
const PAGE_SIZE: u32 = 18;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A [`CollectionSearch`] backed by the Te Papa collection search API.
///
/// The free-text query is augmented, not sent verbatim: a fixed boolean
/// clause restricts results to the photography collection and requires an
/// image to exist. Facet fields become `production.*` filter entries.
///
/// Failure never propagates. A non-200 status or transport error is logged
/// and degrades to an empty record set; the [`SearchResult`] still carries
/// the body that was attempted so callers can inspect what was asked.
pub struct TePapaSearchClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl TePapaSearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_url(api_key, SEARCH_URL)
    }

    /// Target a non-default endpoint. Used by tests to point at a local stub.
    pub fn with_url(api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            url: url.into(),
        }
    }

    /// Build the exact wire body for a query. Pure function of its input:
    /// identical queries yield identical bodies.
    pub fn request_body(query: &SearchQuery) -> Value {
        let filters: Vec<Value> = query
            .facet()
            .map(|facet| facet.to_filters())
            .unwrap_or_default();

        json!({
            "query": format!("{} {QUERY_SUFFIX}", query.text()),
            "defaultOperator": "AND",
            "size": PAGE_SIZE,
            "filters": filters,
        })
    }

    fn extract_records(body: Value) -> Vec<SearchRecord> {
        match body.get("results") {
            Some(Value::Array(results)) => results
                .iter()
                .filter_map(|record| match record {
                    Value::Object(map) => Some(map.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl CollectionSearch for TePapaSearchClient {
    async fn search(&self, query: &SearchQuery) -> SearchResult {
        let body = Self::request_body(query);
        debug!("TePapaSearchClient: issuing query: {body}");

        let response = match self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("TePapaSearchClient: request failed: {e}. Returning no results.");
                return SearchResult::empty(body);
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("TePapaSearchClient: API returned {status}: {text}. Returning no results.");
            return SearchResult::empty(body);
        }

        let payload: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("TePapaSearchClient: failed to parse response: {e}. Returning no results.");
                return SearchResult::empty(body);
            }
        };

        let records = Self::extract_records(payload);
        debug!("TePapaSearchClient: {} record(s)", records.len());
        SearchResult::new(records, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateFacet;

    #[test]
    fn body_augments_query_and_fixes_size() {
        let body = TePapaSearchClient::request_body(&SearchQuery::new("ships"));
        assert_eq!(
            body["query"],
            "ships AND collection:Photography AND _exists_:hasRepresentation"
        );
        assert_eq!(body["defaultOperator"], "AND");
        assert_eq!(body["size"], 18);
        assert_eq!(body["filters"], json!([]));
    }

    #[test]
    fn body_translates_facet_to_filters() {
        let query = SearchQuery::new("portraits of Wellington")
            .with_facet(DateFacet::new().with_year("1877"));
        let body = TePapaSearchClient::request_body(&query);
        assert_eq!(
            body["filters"],
            json!([{"field": "production.facetCreatedDate.year", "keyword": "1877"}])
        );
    }

    #[test]
    fn body_construction_is_idempotent() {
        let query = SearchQuery::new("portraits of Wellington")
            .with_facet(DateFacet::new().with_decade_of_century("1870s"));
        assert_eq!(
            TePapaSearchClient::request_body(&query),
            TePapaSearchClient::request_body(&query)
        );
    }

    #[test]
    fn extract_records_defaults_to_empty() {
        assert!(TePapaSearchClient::extract_records(json!({})).is_empty());
        assert!(TePapaSearchClient::extract_records(json!({"results": "oops"})).is_empty());
    }

    #[test]
    fn extract_records_keeps_objects() {
        let records =
            TePapaSearchClient::extract_records(json!({"results": [{"id": "x"}, 42]}));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "x");
    }

    #[tokio::test]
    async fn server_error_status_degrades_to_empty() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Minimal one-shot server answering 500 to whatever arrives.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let mut seen = Vec::new();
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            seen.extend_from_slice(&buf[..n]);
                            if seen.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\n\
                          content-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            }
        });

        let client = TePapaSearchClient::with_url("key", format!("http://{addr}/search"));
        let result = client.search(&SearchQuery::new("ships")).await;
        assert!(result.is_empty());
        assert_eq!(
            result.issued_query()["query"],
            "ships AND collection:Photography AND _exists_:hasRepresentation"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_empty() {
        // Nothing listens on this port; the connect error must not escalate.
        let client = TePapaSearchClient::with_url("key", "http://127.0.0.1:9/search");
        let result = client.search(&SearchQuery::new("ships")).await;
        assert!(result.is_empty());
        assert_eq!(
            result.issued_query()["query"],
            "ships AND collection:Photography AND _exists_:hasRepresentation"
        );
    }
}
