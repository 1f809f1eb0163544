//! Request handling for the stdio plugin.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docseek_types::{IconSpec, ManifestHandler, PluginManifest, ResultItem};
use tracing::{debug, info, warn};

use crate::Result;
use crate::backend::{SearchBackend, SearchRequest};
use crate::config::Config;
use crate::convert::{ItemContext, OPEN_ACTION, REVEAL_ACTION, docs_to_items};
use crate::dedup::deduplicate_raw;
use crate::icons::MimeIconResolver;
use crate::platform::{self, Platform};
use crate::protocol::{ExecuteData, PluginInput, PluginResponse, Step};
use crate::record::{RawDoc, path_from_url, validate_all};
use crate::reveal::spawn_detached;

const PLUGIN_NAME: &str = "Documents";
const PLUGIN_DESCRIPTION: &str = "Search the Recoll desktop index";
const PLUGIN_ICON: &str = "find_in_page";
const SEARCH_PLACEHOLDER: &str = "Search documents...";

const BACKEND_MISSING_ID: &str = "__backend_missing__";
const SEARCH_ERROR_ID: &str = "__search_error__";

/// Launches an argv; swapped out in tests.
pub type Spawner = Arc<dyn Fn(&[String]) -> Result<()> + Send + Sync>;

/// Answers launcher requests against a search backend.
pub struct RecollPlugin<B> {
    config: Config,
    backend: B,
    icons: MimeIconResolver,
    platform: Platform,
    home: Option<PathBuf>,
    spawner: Spawner,
}

impl<B: SearchBackend> RecollPlugin<B> {
    #[must_use]
    pub fn new(config: Config, backend: B) -> Self {
        let icons = MimeIconResolver::new(config.icon_themes.clone())
            .with_fallback(IconSpec::Material(PLUGIN_ICON.to_string()));
        let home = directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf());
        let platform = platform::detect();
        info!("Detected platform: {}", platform.as_str());

        Self {
            config,
            backend,
            icons,
            platform,
            home,
            spawner: Arc::new(spawn_detached),
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    #[must_use]
    pub fn with_spawner(mut self, spawner: Spawner) -> Self {
        self.spawner = spawner;
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle one protocol request. Never fails; problems become error
    /// responses or hint items.
    pub async fn handle(&self, input: PluginInput) -> PluginResponse {
        debug!("Handling {:?} step", input.step);
        match input.step {
            Step::Initial => PluginResponse::Results {
                items: Vec::new(),
                placeholder: Some(SEARCH_PLACEHOLDER.to_string()),
                input_mode: None,
            },
            Step::Search => self.search(input.query.as_deref().unwrap_or_default()).await,
            Step::Action => self.action(
                input.selected.as_ref().map(|s| s.id.as_str()),
                input.action.as_deref(),
            ),
        }
    }

    /// Search the backend and render the results.
    ///
    /// Backend failures yield an empty list. Failures while turning records
    /// into items yield a single error item.
    pub async fn search(&self, query: &str) -> PluginResponse {
        let query = query.trim();
        if query.is_empty() {
            return PluginResponse::results(Vec::new());
        }

        if !self.backend.is_available() {
            warn!("Search backend {} is not available", self.backend.name());
            return PluginResponse::results(vec![backend_missing_item(self.backend.name())]);
        }

        let request = SearchRequest::new(query, self.config.max_results)
            .with_wildcard(self.config.append_wildcard);
        let raw = match self.backend.search(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                Vec::new()
            }
        };

        match self.render(raw, query) {
            Ok(items) => PluginResponse::results(items),
            Err(e) => {
                warn!("Failed to render results for '{}': {}", query, e);
                PluginResponse::results(vec![search_error_item()])
            }
        }
    }

    fn render(&self, raw: Vec<RawDoc>, query: &str) -> Result<Vec<ResultItem>> {
        let docs = if self.config.remove_duplicates {
            deduplicate_raw(raw)?
        } else {
            validate_all(raw)?
        };
        let ctx = ItemContext {
            config: &self.config,
            icons: &self.icons,
            platform: self.platform,
            home: self.home.as_deref(),
        };
        Ok(docs_to_items(&docs, query, &ctx))
    }

    /// Run an item action. A missing action name means open.
    #[must_use]
    pub fn action(&self, item_id: Option<&str>, action: Option<&str>) -> PluginResponse {
        let Some(url) = item_id else {
            return PluginResponse::error("No item selected", None);
        };
        if url == BACKEND_MISSING_ID || url == SEARCH_ERROR_ID {
            return PluginResponse::Noop;
        }

        match action.unwrap_or(OPEN_ACTION) {
            OPEN_ACTION => PluginResponse::Execute(ExecuteData {
                open_url: Some(url.to_string()),
                close: Some(true),
                ..Default::default()
            }),
            REVEAL_ACTION => self.reveal(url),
            other => PluginResponse::error(format!("Unknown action: {other}"), None),
        }
    }

    fn reveal(&self, url: &str) -> PluginResponse {
        let Some(path) = path_from_url(url) else {
            return PluginResponse::error(format!("Not a local file: {url}"), None);
        };
        let Some(argv) = self
            .config
            .reveal_file_command
            .argv(self.platform, Path::new(path))
        else {
            return PluginResponse::error(
                format!(
                    "No reveal command configured for {}",
                    self.platform.as_str()
                ),
                None,
            );
        };

        match (self.spawner)(&argv) {
            Ok(()) => PluginResponse::Execute(ExecuteData {
                close: Some(true),
                ..Default::default()
            }),
            Err(e) => {
                warn!("Failed to reveal {}: {}", path, e);
                PluginResponse::error("Failed to reveal file", Some(e.to_string()))
            }
        }
    }
}

fn backend_missing_item(backend: &str) -> ResultItem {
    ResultItem {
        id: BACKEND_MISSING_ID.to_string(),
        name: "Recoll not found".to_string(),
        description: Some(format!(
            "Install Recoll and make sure {backend} is on your PATH or set backend.recollqPath"
        )),
        ..Default::default()
    }
    .with_icon(&IconSpec::Material("error".to_string()))
}

fn search_error_item() -> ResultItem {
    ResultItem {
        id: SEARCH_ERROR_ID.to_string(),
        name: "Error querying Recoll".to_string(),
        description: Some("Check logs for details".to_string()),
        ..Default::default()
    }
    .with_icon(&IconSpec::Material("error".to_string()))
}

/// Manifest telling the launcher how to run this plugin.
#[must_use]
pub fn manifest(config: &Config, command: &str) -> PluginManifest {
    PluginManifest {
        name: PLUGIN_NAME.to_string(),
        description: Some(PLUGIN_DESCRIPTION.to_string()),
        icon: Some(PLUGIN_ICON.to_string()),
        prefix: Some(config.trigger().to_string()),
        handler: ManifestHandler {
            handler_type: "stdio".to_string(),
            command: command.to_string(),
        },
    }
}
