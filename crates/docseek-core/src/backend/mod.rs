//! Search backends.
//!
//! The plugin never indexes or ranks anything itself; it hands the query to
//! a backend and gets [`RawDoc`] records back in backend order.

mod recollq;

pub use recollq::{RESULT_FIELDS, RecollqBackend, parse_output};

use std::future::Future;

use crate::Result;
use crate::record::RawDoc;

/// A single query against the index.
///
/// There are no abstract formatting options (maximum length, context
/// words): recollq `-F` output carries the stored abstract as is, and the
/// snippet window is cut afterwards by [`crate::snippet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    /// Append `*` so that prefixes of words match while typing
    pub wildcard: bool,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            wildcard: true,
        }
    }

    #[must_use]
    pub fn with_wildcard(mut self, wildcard: bool) -> Self {
        self.wildcard = wildcard;
        self
    }

    /// Query string as passed to the backend.
    #[must_use]
    pub fn query_string(&self) -> String {
        if self.wildcard && !self.query.ends_with('*') {
            format!("{}*", self.query)
        } else {
            self.query.clone()
        }
    }
}

/// Source of search results.
pub trait SearchBackend: Send + Sync {
    /// Human-readable backend name for logs and messages.
    fn name(&self) -> &str;

    /// Whether the backend can be queried at all (e.g. its binary exists).
    fn is_available(&self) -> bool;

    /// Run a query and return at most `request.limit` records.
    fn search(&self, request: &SearchRequest) -> impl Future<Output = Result<Vec<RawDoc>>> + Send;
}
