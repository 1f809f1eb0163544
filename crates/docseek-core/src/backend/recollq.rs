//! Recoll backend driven through the `recollq` command-line client.
//!
//! With `-F`, recollq prints one line per result holding the requested
//! fields base64-encoded and separated by single spaces. Anything else it
//! prints (the parsed query, the result count) is skipped.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{SearchBackend, SearchRequest};
use crate::config::BackendConfig;
use crate::record::RawDoc;
use crate::{Error, Result};

/// Fields requested from recollq, in output order.
pub const RESULT_FIELDS: [&str; 5] = ["url", "filename", "abstract", "relevancyrating", "mtype"];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// The program is looked up on `PATH` once, at construction; installing
/// recollq afterwards needs a new backend.
#[derive(Debug, Clone)]
pub struct RecollqBackend {
    program: PathBuf,
    resolved: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    timeout: Duration,
}

impl RecollqBackend {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let resolved = resolve(&program);
        Self {
            program,
            resolved,
            config_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            config_dir: config.config_dir.clone(),
            timeout: Duration::from_millis(config.query_timeout_ms),
            ..Self::new(config.recollq_path.clone())
        }
    }

    /// Absolute path of the program, if it was found.
    #[must_use]
    pub fn resolved_program(&self) -> Option<&Path> {
        self.resolved.as_deref()
    }

    /// Use a Recoll configuration directory other than the default `~/.recoll`.
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn args(&self, request: &SearchRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(dir) = &self.config_dir {
            args.push("-c".into());
            args.push(dir.clone().into_os_string());
        }
        args.push("-n".into());
        args.push(request.limit.to_string().into());
        args.push("-F".into());
        args.push(RESULT_FIELDS.join(" ").into());
        args.push(request.query_string().into());
        args
    }

    // Duration millis fits in u64 for any configurable timeout
    #[allow(clippy::cast_possible_truncation)]
    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

fn resolve(program: &Path) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            debug!("Resolved {} to {}", program.display(), path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Cannot find {}: {}", program.display(), e);
            None
        }
    }
}

impl Default for RecollqBackend {
    fn default() -> Self {
        Self::new("recollq")
    }
}

impl SearchBackend for RecollqBackend {
    fn name(&self) -> &str {
        "recollq"
    }

    fn is_available(&self) -> bool {
        self.resolved.is_some()
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawDoc>> {
        if request.limit == 0 {
            return Ok(Vec::new());
        }

        let Some(program) = &self.resolved else {
            return Err(Error::BackendUnavailable(format!(
                "{} not found",
                self.program.display()
            )));
        };

        let args = self.args(request);
        debug!("Running {} {:?}", program.display(), args);

        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| Error::Timeout(self.timeout_ms()))?
            .map_err(|e| {
                Error::Process(format!("Failed to spawn {}: {}", program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Backend(format!(
                "recollq exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut docs = parse_output(&stdout);
        docs.truncate(request.limit);
        debug!("recollq returned {} results", docs.len());
        Ok(docs)
    }
}

/// Parse recollq `-F` output into records, skipping non-result lines.
#[must_use]
pub fn parse_output(stdout: &str) -> Vec<RawDoc> {
    stdout.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<RawDoc> {
    let mut tokens: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(' ').collect();
    if tokens.len() == RESULT_FIELDS.len() + 1 && tokens.last() == Some(&"") {
        tokens.pop();
    }
    if tokens.len() != RESULT_FIELDS.len() {
        return None;
    }

    let mut fields = Vec::with_capacity(RESULT_FIELDS.len());
    for token in tokens {
        let bytes = STANDARD.decode(token).ok()?;
        fields.push(String::from_utf8_lossy(&bytes).into_owned());
    }

    let mut fields = fields.into_iter();
    let doc = RawDoc {
        url: fields.next()?,
        filename: fields.next()?,
        abstract_text: fields.next()?,
        relevancy_rating: fields.next()?,
        mtype: fields.next()?,
    };

    if doc.url.is_empty() {
        warn!("Skipping recollq result without url");
        return None;
    }
    Some(doc)
}
