//! Test module for docseek-core
//!
//! Covers the pieces that only make sense together:
//! - Record conversion into launcher items (names, chips, actions, icons)
//! - The protocol handler over a fake backend
//! - Configuration loading, defaults and persistence

// Relevance values in tests are exact
#![allow(clippy::float_cmp)]
