pub mod backend;
pub mod config;
pub mod convert;
pub mod dedup;
pub mod handler;
pub mod icons;
pub mod platform;
pub mod protocol;
pub mod record;
pub mod reveal;
pub mod snippet;

mod error;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use handler::{RecollPlugin, manifest};
pub use record::{Doc, RawDoc, Relevance};

pub use docseek_types::*;
