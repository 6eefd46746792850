use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DateFacet;

/// One opaque record returned by the collection API. The record schema belongs
/// to the remote service; we pass it through untouched.
pub type SearchRecord = Map<String, Value>;

/// A collection search as decided by the model: free text plus an optional
/// creation-date facet. Constructed once from decoded tool arguments and
/// consumed by a single search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
    facet: Option<DateFacet>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            facet: None,
        }
    }

    pub fn with_facet(mut self, facet: DateFacet) -> Self {
        self.facet = Some(facet);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn facet(&self) -> Option<&DateFacet> {
        self.facet.as_ref()
    }
}

/// The outcome of one collection search.
///
/// `issued_query` is the exact JSON body sent over the wire, kept for caller
/// transparency and diagnostics. It is populated even when the search failed;
/// a failed search degrades to empty `records`, never to an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    records: Vec<SearchRecord>,
    issued_query: Value,
}

impl SearchResult {
    pub fn new(records: Vec<SearchRecord>, issued_query: Value) -> Self {
        Self {
            records,
            issued_query,
        }
    }

    pub fn empty(issued_query: Value) -> Self {
        Self {
            records: Vec::new(),
            issued_query,
        }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn issued_query(&self) -> &Value {
        &self.issued_query
    }

    pub fn into_parts(self) -> (Vec<SearchRecord>, Value) {
        (self.records, self.issued_query)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
