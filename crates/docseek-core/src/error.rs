use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid relevance rating '{value}' for {url}")]
    InvalidRelevance { url: String, value: String },

    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Search backend error: {0}")]
    Backend(String),

    #[error("Search timed out after {0}ms")]
    Timeout(u64),

    #[error("Process error: {0}")]
    Process(String),
}

pub type Result<T> = std::result::Result<T, Error>;
