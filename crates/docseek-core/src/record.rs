//! Search result records.
//!
//! [`RawDoc`] is what the backend hands back, field for field. [`Doc`] is
//! the validated form the rest of the crate works with: its relevance has
//! been parsed, so nothing downstream has to deal with malformed scores.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of URLs that point at local files.
pub const FILE_URL_PREFIX: &str = "file://";

/// Backend-provided relevance score; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Relevance(f64);

impl Relevance {
    /// Wrap a score. Returns `None` for NaN and infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// Parse a rating as Recoll formats it, e.g. `"87%"` or `"87.5 %"`.
    /// A bare number is accepted too.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        number.parse::<f64>().ok().and_then(Self::new)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A result record exactly as the search backend returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDoc {
    pub url: String,
    pub filename: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(rename = "relevancyrating")]
    pub relevancy_rating: String,
    #[serde(default)]
    pub mtype: String,
}

/// A validated search result.
#[derive(Debug, Clone, PartialEq)]
pub struct Doc {
    pub url: String,
    pub filename: String,
    pub abstract_text: String,
    pub relevance: Relevance,
    pub mime_type: Option<String>,
}

impl Doc {
    /// Local filesystem path for `file://` URLs.
    #[must_use]
    pub fn local_path(&self) -> Option<&str> {
        path_from_url(&self.url)
    }
}

impl TryFrom<RawDoc> for Doc {
    type Error = Error;

    fn try_from(raw: RawDoc) -> Result<Self> {
        let relevance =
            Relevance::parse(&raw.relevancy_rating).ok_or_else(|| Error::InvalidRelevance {
                url: raw.url.clone(),
                value: raw.relevancy_rating.clone(),
            })?;

        let mime_type = Some(raw.mtype.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Ok(Self {
            url: raw.url,
            filename: raw.filename,
            abstract_text: raw.abstract_text,
            relevance,
            mime_type,
        })
    }
}

/// Validate a whole batch. Fails on the first record with a bad rating.
///
/// # Errors
///
/// Returns [`Error::InvalidRelevance`] if any rating does not parse.
pub fn validate_all(raw: Vec<RawDoc>) -> Result<Vec<Doc>> {
    raw.into_iter().map(Doc::try_from).collect()
}

/// Strip the `file://` scheme. Non-file URLs have no local path.
#[must_use]
pub fn path_from_url(url: &str) -> Option<&str> {
    url.strip_prefix(FILE_URL_PREFIX)
}
