//! Stdio plugin protocol.
//!
//! The launcher writes one [`PluginInput`] JSON object per line to the
//! handler's stdin and reads one [`PluginResponse`] per line from stdout.

use docseek_types::ResultItem;
use serde::{Deserialize, Serialize};

/// Input received from the launcher (stdin)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInput {
    pub step: Step,

    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub selected: Option<SelectedItem>,

    #[serde(default)]
    pub action: Option<String>,
}

impl PluginInput {
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            step: Step::Search,
            query: Some(query.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn action(item_id: impl Into<String>, action: Option<&str>) -> Self {
        Self {
            step: Step::Action,
            selected: Some(SelectedItem { id: item_id.into() }),
            action: action.map(str::to_string),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Initial,
    Search,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectedItem {
    pub id: String,
}

/// Response written to the launcher (stdout)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PluginResponse {
    Results {
        items: Vec<ResultItem>,

        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,

        #[serde(rename = "inputMode", skip_serializing_if = "Option::is_none")]
        input_mode: Option<String>,
    },

    Execute(ExecuteData),

    Error {
        message: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Handled, nothing to return
    Noop,
}

impl PluginResponse {
    #[must_use]
    pub fn results(items: Vec<ResultItem>) -> Self {
        Self::Results {
            items,
            placeholder: None,
            input_mode: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Error {
            message: message.into(),
            details,
        }
    }

    /// Serialize as a single protocol line (without the trailing newline).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// What the launcher should do after an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteData {
    /// Open with the default application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_search_input() {
        let input: PluginInput =
            serde_json::from_str(r#"{"step": "search", "query": "invoice"}"#).unwrap();
        assert_eq!(input, PluginInput::search("invoice"));
    }

    #[test]
    fn parses_action_input_and_ignores_extra_fields() {
        let input: PluginInput = serde_json::from_value(json!({
            "step": "action",
            "selected": {"id": "file:///a.pdf", "extra": 1},
            "action": "reveal",
            "session": "abc",
            "formData": {}
        }))
        .unwrap();
        assert_eq!(input.step, Step::Action);
        assert_eq!(input.selected.unwrap().id, "file:///a.pdf");
        assert_eq!(input.action.as_deref(), Some("reveal"));
        assert_eq!(input.query, None);
    }

    #[test]
    fn rejects_unknown_step() {
        assert!(serde_json::from_str::<PluginInput>(r#"{"step": "form"}"#).is_err());
    }

    #[test]
    fn results_serialize_with_type_tag() {
        let response = PluginResponse::results(vec![ResultItem {
            id: "a".to_string(),
            name: "A".to_string(),
            ..Default::default()
        }]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"type": "results", "items": [{"id": "a", "name": "A"}]})
        );
    }

    #[test]
    fn execute_is_flattened_into_response() {
        let response = PluginResponse::Execute(ExecuteData {
            open_url: Some("file:///a.pdf".to_string()),
            close: Some(true),
            ..Default::default()
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"type": "execute", "openUrl": "file:///a.pdf", "close": true})
        );
    }

    #[test]
    fn error_and_noop_serialize() {
        let line = PluginResponse::error("boom", None).to_line().unwrap();
        assert_eq!(line, r#"{"type":"error","message":"boom"}"#);

        let line = PluginResponse::Noop.to_line().unwrap();
        assert_eq!(line, r#"{"type":"noop"}"#);
    }
}
