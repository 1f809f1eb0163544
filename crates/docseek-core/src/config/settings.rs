use crate::Result;
use crate::reveal::RevealCommands;
use crate::snippet::DEFAULT_SNIPPET_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Search on every query without a trigger prefix. This makes the
    /// plugin answer everything typed into the launcher.
    #[serde(default = "default_true")]
    pub always_search_files: bool,

    /// Trigger used when `always_search_files` is off
    #[serde(default = "default_trigger_prefix")]
    pub trigger_prefix: String,

    /// Collapse results that point at the same URL
    #[serde(default = "default_true")]
    pub remove_duplicates: bool,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Snippet window in characters
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,

    #[serde(default = "default_true")]
    pub append_wildcard: bool,

    /// Show the relevance rating as a chip on each result
    #[serde(default = "default_true")]
    pub show_relevance: bool,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Icon theme roots searched for mime type icons
    #[serde(default = "default_icon_themes")]
    pub icon_themes: Vec<PathBuf>,

    #[serde(default)]
    pub reveal_file_command: RevealCommands,
}

fn default_true() -> bool {
    true
}
fn default_trigger_prefix() -> String {
    "rc ".to_string()
}
fn default_max_results() -> usize {
    10
}
fn default_snippet_length() -> usize {
    DEFAULT_SNIPPET_LENGTH
}
fn default_icon_themes() -> Vec<PathBuf> {
    vec![PathBuf::from("/usr/share/icons/breeze")]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            always_search_files: true,
            trigger_prefix: default_trigger_prefix(),
            remove_duplicates: true,
            max_results: default_max_results(),
            snippet_length: default_snippet_length(),
            append_wildcard: true,
            show_relevance: true,
            backend: BackendConfig::default(),
            icon_themes: default_icon_themes(),
            reveal_file_command: RevealCommands::default(),
        }
    }
}

impl Config {
    /// Trigger the launcher should route to this plugin.
    #[must_use]
    pub fn trigger(&self) -> &str {
        if self.always_search_files {
            ""
        } else {
            &self.trigger_prefix
        }
    }

    /// Load config from file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// How to reach the Recoll index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    #[serde(default = "default_recollq_path")]
    pub recollq_path: PathBuf,

    /// Recoll configuration directory, `~/.recoll` when unset
    #[serde(default)]
    pub config_dir: Option<PathBuf>,

    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,
}

fn default_recollq_path() -> PathBuf {
    PathBuf::from("recollq")
}
fn default_query_timeout() -> u64 {
    3000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            recollq_path: default_recollq_path(),
            config_dir: None,
            query_timeout_ms: default_query_timeout(),
        }
    }
}
