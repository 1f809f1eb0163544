//! Snippet extraction for result subtexts.
//!
//! Recoll abstracts are longer than a launcher row can show, and for stemmed
//! or wildcard matches the literal query often does not occur in them. The
//! extractor slides the query over the abstract, scores every position by how
//! many characters line up, and cuts a fixed-size window around the best one.

/// Marker added on each side of a snippet that does not reach the text edge.
pub const TRUNCATION_MARKER: &str = "...";

/// Default snippet window, in characters.
pub const DEFAULT_SNIPPET_LENGTH: usize = 80;

/// Best-scoring query placement within a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// Character offset of the window start.
    pub offset: usize,
    /// Number of positions where the window equals the query.
    pub score: usize,
}

/// Lowercase a single character without changing the character count.
///
/// Characters whose lowercase form expands to several characters are kept
/// as-is so that offsets in the folded text match the original.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Find the offset where `query` lines up best with `text`.
///
/// Both inputs are compared case-insensitively. The score of an offset is the
/// count of positions whose characters match (Hamming similarity). Only a
/// strictly greater score replaces the current best, so the earliest maximal
/// offset wins.
///
/// Returns `None` when the query is empty or longer than the text.
#[must_use]
pub fn best_alignment(query: &str, text: &str) -> Option<Alignment> {
    let query: Vec<char> = query.chars().map(fold).collect();
    let text: Vec<char> = text.chars().map(fold).collect();
    align(&query, &text)
}

fn align(query: &[char], text: &[char]) -> Option<Alignment> {
    if query.is_empty() {
        return None;
    }

    let mut best: Option<Alignment> = None;
    for (offset, window) in text.windows(query.len()).enumerate() {
        let score = window.iter().zip(query).filter(|(a, b)| a == b).count();
        if best.is_none_or(|b| score > b.score) {
            best = Some(Alignment { offset, score });
        }
    }
    best
}

/// Return up to `window` characters of `text` centred on the best match of
/// `query`, with [`TRUNCATION_MARKER`] on each side that was cut.
///
/// An empty query or text yields an empty string. When the query is longer
/// than the text no placement fits and the snippet is centred as if the match
/// were at offset 0.
#[must_use]
pub fn extract_around_match(query: &str, text: &str, window: usize) -> String {
    let query: Vec<char> = query.chars().map(fold).collect();
    let original: Vec<char> = text.chars().collect();

    if query.is_empty() || original.is_empty() {
        return String::new();
    }

    let folded: Vec<char> = original.iter().copied().map(fold).collect();
    let best_offset = align(&query, &folded).map_or(0, |a| a.offset);

    let match_center = best_offset + query.len() / 2;
    let text_len = original.len();

    let mut start = match_center.saturating_sub(window / 2);
    let mut end = start.saturating_add(window);
    if end > text_len {
        end = text_len;
        start = end.saturating_sub(window);
    }

    let mut snippet = String::with_capacity((end - start) + 2 * TRUNCATION_MARKER.len());
    if start > 0 {
        snippet.push_str(TRUNCATION_MARKER);
    }
    snippet.extend(&original[start..end]);
    if end < text_len {
        snippet.push_str(TRUNCATION_MARKER);
    }
    snippet
}
