//! Turn search records into launcher result items.

use std::path::Path;

use docseek_types::{Action, Chip, ResultItem};
use tracing::debug;

use crate::config::Config;
use crate::icons::MimeIconResolver;
use crate::platform::Platform;
use crate::record::Doc;
use crate::snippet::extract_around_match;

pub const OPEN_ACTION: &str = "open";
pub const REVEAL_ACTION: &str = "reveal";

/// Everything besides the records themselves that shapes an item.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    pub config: &'a Config,
    pub icons: &'a MimeIconResolver,
    pub platform: Platform,
    pub home: Option<&'a Path>,
}

/// Convert validated records into items, keeping their order.
///
/// Records that do not point at a local file are dropped.
#[must_use]
pub fn docs_to_items(docs: &[Doc], query: &str, ctx: &ItemContext<'_>) -> Vec<ResultItem> {
    docs.iter()
        .filter_map(|doc| doc_to_item(doc, query, ctx))
        .collect()
}

fn doc_to_item(doc: &Doc, query: &str, ctx: &ItemContext<'_>) -> Option<ResultItem> {
    let Some(path) = doc.local_path().map(Path::new) else {
        debug!("Skipping non-file result {}", doc.url);
        return None;
    };

    let filename = if doc.filename.is_empty() {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        doc.filename.clone()
    };
    let dir = path
        .parent()
        .map(|d| replace_home_with_tilde(d, ctx.home))
        .unwrap_or_default();

    let mut actions = Vec::with_capacity(2);
    if ctx
        .config
        .reveal_file_command
        .template(ctx.platform)
        .is_some()
    {
        actions.push(
            Action::new(REVEAL_ACTION, "Reveal in file browser").with_material_icon("folder_open"),
        );
    }
    actions.push(
        Action::new(OPEN_ACTION, "Open with default application").with_material_icon("open_in_new"),
    );

    let chips = if ctx.config.show_relevance {
        vec![Chip {
            text: doc.relevance.to_string(),
            icon: None,
        }]
    } else {
        Vec::new()
    };

    let snippet = extract_around_match(query, &doc.abstract_text, ctx.config.snippet_length);

    let item = ResultItem {
        id: doc.url.clone(),
        name: format!("{filename} • {dir}"),
        description: Some(snippet).filter(|s| !s.is_empty()),
        verb: Some("Open".to_string()),
        chips,
        actions,
        ..Default::default()
    };
    Some(item.with_icon(&ctx.icons.icon_for(doc.mime_type.as_deref())))
}

/// Display `path` with the home directory shortened to `~`.
#[must_use]
pub fn replace_home_with_tilde(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return Path::new("~").join(rest).to_string_lossy().into_owned();
    }
    path.to_string_lossy().into_owned()
}
