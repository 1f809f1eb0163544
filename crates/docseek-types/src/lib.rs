//! Shared types for docseek components.
//!
//! These are the result item and action shapes the launcher host renders.
//! Everything here is serializable because it travels as JSON over the
//! plugin's stdout.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

// Serde skip_serializing_if requires &bool signature
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

/// A selectable entry in the launcher's result list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_null_as_empty_vec"
    )]
    pub chips: Vec<Chip>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_null_as_empty_vec"
    )]
    pub actions: Vec<Action>,

    /// Whether selecting this item should keep the launcher open
    #[serde(default, skip_serializing_if = "is_false")]
    pub keep_open: bool,
}

impl ResultItem {
    /// Set `icon` and `icon_type` from an [`IconSpec`].
    #[must_use]
    pub fn with_icon(mut self, icon: &IconSpec) -> Self {
        let (value, kind) = icon.to_wire();
        self.icon = Some(value);
        self.icon_type = Some(kind.to_string());
        self
    }

    #[must_use]
    pub fn verb_or_default(&self) -> &str {
        self.verb.as_deref().unwrap_or("Open")
    }
}

/// Icon specification.
///
/// On the wire an icon is a plain string plus an `iconType` hint; this enum
/// is the typed form used while building items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSpec {
    /// Freedesktop/system icon name
    System(String),

    /// Material symbol name
    Material(String),

    /// File path
    Path(PathBuf),
}

impl IconSpec {
    /// Split into the `(icon, iconType)` pair used by [`ResultItem`].
    #[must_use]
    pub fn to_wire(&self) -> (String, &'static str) {
        match self {
            IconSpec::System(s) => (s.clone(), "system"),
            IconSpec::Material(s) => (s.clone(), "material"),
            IconSpec::Path(p) => (p.to_string_lossy().into_owned(), "path"),
        }
    }

    /// Build from the wire pair. Unknown or missing types fall back to material.
    #[must_use]
    pub fn from_wire(icon: String, icon_type: Option<&str>) -> Self {
        match icon_type {
            Some("system") => IconSpec::System(icon),
            Some("path") => IconSpec::Path(PathBuf::from(icon)),
            _ => IconSpec::Material(icon),
        }
    }
}

impl Default for IconSpec {
    fn default() -> Self {
        Self::Material("find_in_page".to_string())
    }
}

/// Chip shown next to a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    /// Text to display (accepts both "text" and "label" from JSON)
    #[serde(alias = "label", default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Action on a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    #[serde(default)]
    pub keep_open: bool,
}

impl Action {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            icon_type: None,
            keep_open: false,
        }
    }

    #[must_use]
    pub fn with_material_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self.icon_type = Some("material".to_string());
        self
    }
}

/// Host manifest describing how the launcher should run this plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub handler: ManifestHandler,
}

/// Handler section of [`PluginManifest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestHandler {
    #[serde(rename = "type")]
    pub handler_type: String,
    pub command: String,
}
