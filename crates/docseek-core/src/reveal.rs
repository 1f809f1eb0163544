//! Reveal a file in the platform's file manager.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::platform::Platform;
use crate::{Error, Result};

/// Replaced by the full path of the file to reveal.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Replaced by the directory containing the file.
pub const DIR_PLACEHOLDER: &str = "{dir}";

/// Per-platform argv templates for revealing a file.
///
/// An argument that is exactly empty is also replaced by the file path,
/// which keeps older configs written as `["nautilus", "--select", ""]` working.
/// An empty template disables the reveal action on that platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealCommands {
    #[serde(default = "default_linux")]
    pub linux: Vec<String>,

    #[serde(default = "default_macos")]
    pub macos: Vec<String>,

    #[serde(default = "default_windows")]
    pub windows: Vec<String>,
}

// Nautilus unzips ZIP archives unless --select comes before the path
fn default_linux() -> Vec<String> {
    ["nautilus", "--select", FILE_PLACEHOLDER, "--new-window"]
        .map(String::from)
        .to_vec()
}
fn default_macos() -> Vec<String> {
    ["open", "-R", FILE_PLACEHOLDER].map(String::from).to_vec()
}
fn default_windows() -> Vec<String> {
    vec!["explorer".to_string(), format!("/select,{FILE_PLACEHOLDER}")]
}

impl Default for RevealCommands {
    fn default() -> Self {
        Self {
            linux: default_linux(),
            macos: default_macos(),
            windows: default_windows(),
        }
    }
}

impl RevealCommands {
    /// The configured template for `platform`, if any.
    #[must_use]
    pub fn template(&self, platform: Platform) -> Option<&[String]> {
        let template = match platform {
            Platform::Linux => &self.linux,
            Platform::MacOS => &self.macos,
            Platform::Windows => &self.windows,
            Platform::Unknown => return None,
        };
        (!template.is_empty()).then_some(template.as_slice())
    }

    /// Build the argv that reveals `file` on `platform`.
    #[must_use]
    pub fn argv(&self, platform: Platform, file: &Path) -> Option<Vec<String>> {
        let template = self.template(platform)?;
        let file_str = file.to_string_lossy();
        let dir_str = file
            .parent()
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_default();

        Some(
            template
                .iter()
                .map(|arg| {
                    if arg.is_empty() {
                        file_str.to_string()
                    } else {
                        substitute(arg, &file_str, &dir_str)
                    }
                })
                .collect(),
        )
    }
}

/// Expand placeholders in one left-to-right pass; substituted text is never
/// scanned again.
fn substitute(arg: &str, file: &str, dir: &str) -> String {
    let mut out = String::with_capacity(arg.len() + file.len());
    let mut rest = arg;
    while let Some(idx) = rest.find('{') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if let Some(after) = tail.strip_prefix(FILE_PLACEHOLDER) {
            out.push_str(file);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(DIR_PLACEHOLDER) {
            out.push_str(dir);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Launch `argv` detached from the plugin process.
///
/// The child gets null stdio and, on Unix, its own process group so it
/// survives the plugin exiting. A background thread reaps it.
///
/// # Errors
///
/// Returns an error if `argv` is empty or the process fails to spawn.
pub fn spawn_detached(argv: &[String]) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::Process("Empty command".to_string()))?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command
        .spawn()
        .map_err(|e| Error::Process(format!("Failed to spawn {program}: {e}")))?;
    debug!("Spawned {} (pid {})", program, child.id());

    let program = program.clone();
    std::thread::spawn(move || {
        if let Err(e) = child.wait() {
            warn!("Failed to wait for {}: {}", program, e);
        }
    });
    Ok(())
}
