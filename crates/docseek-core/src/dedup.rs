//! Result deduplication by resource URL.
//!
//! Recoll can return the same file several times, for instance once per
//! matching archive member or once per indexed copy of a mail folder. Only
//! the highest-rated entry per URL is kept.

use std::collections::HashMap;

use tracing::debug;

use crate::Result;
use crate::record::{Doc, RawDoc, Relevance, validate_all};

/// A record that can be deduplicated.
pub trait Ranked {
    /// Identity shared by duplicates.
    fn dedup_key(&self) -> &str;

    /// Score used to pick the surviving duplicate.
    fn relevance(&self) -> Relevance;
}

impl Ranked for Doc {
    fn dedup_key(&self) -> &str {
        &self.url
    }

    fn relevance(&self) -> Relevance {
        self.relevance
    }
}

/// Collapse records sharing a key to the single highest-relevance one.
///
/// On equal relevance the record encountered first is kept. Each survivor
/// takes the position where its key first appeared; records without
/// duplicates are returned untouched.
pub fn deduplicate<R: Ranked>(records: Vec<R>) -> Vec<R> {
    let total = records.len();
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(total);
    let mut kept: Vec<R> = Vec::with_capacity(total);

    for record in records {
        let existing = slots.get(record.dedup_key()).copied();
        match existing {
            Some(idx) => {
                if record.relevance() > kept[idx].relevance() {
                    kept[idx] = record;
                }
            }
            None => {
                slots.insert(record.dedup_key().to_string(), kept.len());
                kept.push(record);
            }
        }
    }

    if kept.len() < total {
        debug!("Removed {} duplicate results", total - kept.len());
    }
    kept
}

/// Validate every raw record, then deduplicate.
///
/// Validation covers the whole batch before any grouping happens.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidRelevance`] if any rating is malformed.
pub fn deduplicate_raw(records: Vec<RawDoc>) -> Result<Vec<Doc>> {
    validate_all(records).map(deduplicate)
}
