//! End-to-end tests running the handler binary against a fake recollq.
#![cfg(unix)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tempfile::TempDir;

struct Sandbox {
    root: TempDir,
    config: PathBuf,
}

fn encode_line(fields: [&str; 5]) -> String {
    fields
        .iter()
        .map(|f| STANDARD.encode(f))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_fake_recollq(dir: &Path) -> PathBuf {
    let results = [
        encode_line([
            "file:///srv/docs/invoice.pdf",
            "invoice.pdf",
            "March vendor invoice",
            "91%",
            "application/pdf",
        ]),
        encode_line([
            "file:///srv/docs/invoice.pdf",
            "invoice.pdf",
            "duplicate hit",
            "40%",
            "application/pdf",
        ]),
        encode_line([
            "file:///srv/docs/notes.txt",
            "notes.txt",
            "call the vendor",
            "55%",
            "text/plain",
        ]),
    ];
    let script = format!(
        "#!/bin/sh\necho 'Recoll query: vendor*'\necho '3 results'\n{}\n",
        results
            .iter()
            .map(|line| format!("echo '{line}'"))
            .collect::<Vec<_>>()
            .join("\n")
    );

    let path = dir.join("recollq");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn sandbox() -> Sandbox {
    let root = TempDir::new().unwrap();
    let recollq = write_fake_recollq(root.path());
    let config = root.path().join("config.json");
    let content = serde_json::json!({
        "iconThemes": [],
        "backend": { "recollqPath": recollq }
    });
    std::fs::write(&config, content.to_string()).unwrap();
    Sandbox { root, config }
}

fn handler(sandbox: &Sandbox) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_docseek-handler"));
    command
        .arg("--config")
        .arg(&sandbox.config)
        .env("HOME", sandbox.root.path())
        .env("XDG_CONFIG_HOME", sandbox.root.path().join("config"))
        .env("XDG_DATA_HOME", sandbox.root.path().join("data"))
        .env("XDG_CACHE_HOME", sandbox.root.path().join("cache"));
    command
}

fn run_with_input(sandbox: &Sandbox, input: &str) -> Output {
    let mut child = handler(sandbox)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn responses(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn stdio_session_answers_each_request() {
    let sandbox = sandbox();
    let output = run_with_input(
        &sandbox,
        concat!(
            "{\"step\":\"initial\"}\n",
            "{\"step\":\"search\",\"query\":\"vendor\"}\n",
            "{\"step\":\"action\",\"selected\":{\"id\":\"file:///srv/docs/notes.txt\"},\"action\":\"open\"}\n",
        ),
    );

    assert!(output.status.success());
    let responses = responses(&output);
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["placeholder"], "Search documents...");

    let items = responses[1]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "file:///srv/docs/invoice.pdf");
    assert_eq!(items[0]["name"], "invoice.pdf • /srv/docs");
    assert_eq!(items[0]["description"], "March vendor invoice");
    assert_eq!(items[0]["chips"][0]["text"], "91%");
    assert_eq!(items[1]["id"], "file:///srv/docs/notes.txt");

    assert_eq!(responses[2]["type"], "execute");
    assert_eq!(responses[2]["openUrl"], "file:///srv/docs/notes.txt");
}

#[test]
fn malformed_request_does_not_end_session() {
    let sandbox = sandbox();
    let output = run_with_input(&sandbox, "{\"step\":\n{\"step\":\"initial\"}\n");

    assert!(output.status.success());
    let responses = responses(&output);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["type"], "error");
    assert_eq!(responses[1]["type"], "results");
}

#[test]
fn one_shot_query_prints_results() {
    let sandbox = sandbox();
    let output = handler(&sandbox)
        .args(["--query", "vendor"])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(output.status.success());
    let responses = responses(&output);
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["type"], "results");
    assert_eq!(responses[0]["items"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_backend_shows_hint() {
    let sandbox = sandbox();
    let content = serde_json::json!({
        "backend": { "recollqPath": "/nonexistent/recollq" }
    });
    std::fs::write(&sandbox.config, content.to_string()).unwrap();

    let output = handler(&sandbox)
        .args(["--query", "vendor"])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    let responses = responses(&output);
    assert_eq!(responses[0]["items"][0]["name"], "Recoll not found");
}

#[test]
fn manifest_reports_trigger() {
    let sandbox = sandbox();
    std::fs::write(
        &sandbox.config,
        r#"{"alwaysSearchFiles": false, "triggerPrefix": "doc "}"#,
    )
    .unwrap();

    let output = handler(&sandbox).arg("--manifest").output().unwrap();

    assert!(output.status.success());
    let manifest: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(manifest["name"], "Documents");
    assert_eq!(manifest["prefix"], "doc ");
    assert_eq!(manifest["handler"]["type"], "stdio");
}

#[test]
fn logs_go_to_cache_dir_not_stdout() {
    let sandbox = sandbox();
    let output = handler(&sandbox).arg("--manifest").output().unwrap();

    assert!(serde_json::from_slice::<Value>(&output.stdout).is_ok());
    let log_dir = sandbox.root.path().join("cache/docseek");
    assert!(log_dir.is_dir());
}
