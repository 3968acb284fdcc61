//! # coordfs-cli
//!
//! Inspect one node of a coordination store from the command line.
//!
//! The store is either a JSON snapshot loaded into memory or a live
//! ZooKeeper REST gateway. The rendered body goes to stdout unchanged, so a
//! leaf's raw bytes can be piped straight into another tool.
//!
//! ## Usage
//!
//! ```bash
//! # Children of /live_nodes from a gateway
//! coordfs --rest-url http://localhost:9998 /live_nodes
//!
//! # The raw bytes of a leaf from a snapshot
//! coordfs --snapshot cluster.json /clusterprops.json > clusterprops.json
//!
//! # With credentials and the content type on stderr
//! COORDFS_REST_URL=http://zk-gw:9998 coordfs -H 'Authorization=Basic abc=' --show-content-type /security.json
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use tracing::debug;

use coordfs_core_store::CoordinationClient;
use coordfs_http::RestClient;
use coordfs_inspect::{inspect, Body};
use coordfs_memory_store::{InMemoryTree, SnapshotError};

/// coordfs - inspect coordination-store nodes
#[derive(Parser, Debug)]
#[command(name = "coordfs")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["snapshot", "rest_url"])))]
pub struct Args {
    /// Node to inspect (default: /)
    pub path: Option<String>,

    /// Read the tree from a JSON snapshot file
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Base URL of a ZooKeeper REST gateway
    #[arg(long, value_name = "URL", env = "COORDFS_REST_URL")]
    pub rest_url: Option<String>,

    /// Gateway request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Extra header sent to the gateway, as NAME=VALUE (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Print the response content type to stderr
    #[arg(long)]
    pub show_content_type: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("HTTP error: {0}")]
    Http(#[from] coordfs_http::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no store given; use --snapshot or --rest-url")]
    NoSource,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

/// Build the store client the arguments ask for.
pub fn open_client(args: &Args) -> Result<Box<dyn CoordinationClient>, CliError> {
    if let Some(snapshot) = &args.snapshot {
        debug!(snapshot = %snapshot.display(), "using snapshot store");
        return Ok(Box::new(InMemoryTree::load(snapshot)?));
    }

    let url = args.rest_url.as_deref().ok_or(CliError::NoSource)?;
    debug!(%url, timeout = args.timeout, headers = args.headers.len(), "using REST gateway");
    let mut client = RestClient::with_timeout(url, Duration::from_secs(args.timeout))?;
    for (name, value) in &args.headers {
        client = client.with_default_header(name, value)?;
    }
    Ok(Box::new(client))
}

/// Inspect `args.path` and render the response.
pub fn run(args: &Args) -> Result<Body, CliError> {
    let client = open_client(args)?;
    let response = inspect(client.as_ref(), args.path.as_deref());
    Ok(response.into_body()?)
}

/// Write a rendered body. Structured bodies get a trailing newline; raw
/// payloads are written byte for byte.
pub fn write_body(body: &Body, out: &mut impl Write) -> Result<(), CliError> {
    out.write_all(&body.bytes)?;
    if !body.raw {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Run one inspection and report it, returning the process exit code.
///
/// The body goes to `out`; errors and the optional content-type line go to
/// `err`. Only setup failures give a non-zero code: a failed inspection is
/// still a rendered `{"error": ...}` body.
pub fn main_with(args: &Args, out: &mut impl Write, err: &mut impl Write) -> i32 {
    let body = match run(args) {
        Ok(body) => body,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            return 1;
        }
    };

    if args.show_content_type {
        let _ = writeln!(err, "content-type: {}", body.content_type);
    }

    match write_body(&body, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use coordfs_core_store::Format;

    fn snapshot_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(file: &tempfile::NamedTempFile, path: Option<&str>) -> Args {
        Args {
            path: path.map(str::to_string),
            snapshot: Some(file.path().to_path_buf()),
            rest_url: None,
            timeout: 30,
            headers: Vec::new(),
            show_content_type: false,
        }
    }

    const SNAPSHOT: &str = r#"{
        "live_nodes": {"n1": null, "n2": null},
        "clusterprops.json": "{\"urlScheme\":\"https\"}",
        "empty": null
    }"#;

    #[test]
    fn parse_header_works() {
        assert_eq!(
            parse_header("Authorization=Basic abc=").unwrap(),
            ("Authorization".to_string(), "Basic abc=".to_string())
        );
        assert!(parse_header("no-equals").is_err());
        assert!(parse_header("=value").is_err());
    }

    #[test]
    fn source_is_required() {
        // Detach the env fallback so the result does not depend on the caller's shell
        let cmd = Args::command().mut_arg("rest_url", |arg| arg.env(None::<&'static str>));
        assert!(cmd.clone().try_get_matches_from(["coordfs", "/"]).is_err());
        assert!(cmd
            .try_get_matches_from(["coordfs", "--snapshot", "a.json", "/"])
            .is_ok());
    }

    #[test]
    fn sources_are_exclusive() {
        assert!(Args::try_parse_from([
            "coordfs",
            "--snapshot",
            "a.json",
            "--rest-url",
            "http://localhost:9998"
        ])
        .is_err());
    }

    #[test]
    fn headers_and_timeout_parse() {
        let args = Args::try_parse_from([
            "coordfs",
            "--rest-url",
            "http://localhost:9998",
            "-H",
            "X-Api-Key=secret",
            "--header",
            "Authorization=Bearer t",
            "--timeout",
            "5",
            "/live_nodes",
        ])
        .unwrap();
        assert_eq!(args.headers.len(), 2);
        assert_eq!(args.timeout, 5);
        assert_eq!(args.path.as_deref(), Some("/live_nodes"));
        assert!(open_client(&args).is_ok());
    }

    #[test]
    fn directory_from_snapshot() {
        let file = snapshot_file(SNAPSHOT);
        let body = run(&args(&file, Some("/live_nodes"))).unwrap();
        assert!(!body.raw);

        let json: serde_json::Value = serde_json::from_slice(&body.bytes).unwrap();
        assert_eq!(json["/live_nodes"]["n1"]["dataLength"], 0);
        assert!(json["/live_nodes"]["n2"].is_object());
    }

    #[test]
    fn default_path_is_root() {
        let file = snapshot_file(SNAPSHOT);
        let body = run(&args(&file, None)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body.bytes).unwrap();
        assert!(json["/"]["live_nodes"].is_object());
    }

    #[test]
    fn raw_leaf_written_verbatim() {
        let file = snapshot_file(SNAPSHOT);
        let body = run(&args(&file, Some("/clusterprops.json"))).unwrap();
        assert_eq!(body.content_type, Format::JSON);

        let mut out = Vec::new();
        write_body(&body, &mut out).unwrap();
        assert_eq!(out, br#"{"urlScheme":"https"}"#);
    }

    #[test]
    fn structured_body_gets_newline() {
        let file = snapshot_file(SNAPSHOT);
        let body = run(&args(&file, Some("/empty"))).unwrap();

        let mut out = Vec::new();
        write_body(&body, &mut out).unwrap();
        assert_eq!(out, b"{\"/empty\":null}\n");
    }

    #[test]
    fn missing_node_is_error_body_not_cli_error() {
        let file = snapshot_file(SNAPSHOT);
        let body = run(&args(&file, Some("/nope"))).unwrap();
        assert_eq!(&body.bytes[..], br#"{"error":"no such node: /nope"}"#);
    }

    #[test]
    fn bad_snapshot_is_cli_error() {
        let file = snapshot_file("[1, 2]");
        assert!(matches!(
            run(&args(&file, None)),
            Err(CliError::Snapshot(SnapshotError::NotAnObject))
        ));
    }

    #[test]
    fn content_type_line_on_stderr() {
        let file = snapshot_file(r#"{"blob": "binary-ish"}"#);
        let mut args = args(&file, Some("/blob"));
        args.show_content_type = true;

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(main_with(&args, &mut out, &mut err), 0);
        assert_eq!(out, b"binary-ish");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "content-type: application/octet-stream\n"
        );
    }

    #[test]
    fn content_type_hidden_by_default() {
        let file = snapshot_file(SNAPSHOT);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(main_with(&args(&file, Some("/clusterprops.json")), &mut out, &mut err), 0);
        assert!(err.is_empty());
    }

    #[test]
    fn unreadable_snapshot_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            snapshot: Some(dir.path().join("missing.json")),
            ..args(&snapshot_file("{}"), None)
        };

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(main_with(&args, &mut out, &mut err), 1);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Error: "));
        assert!(err.contains("missing.json"));
    }

    #[test]
    fn failed_inspection_exits_zero() {
        let file = snapshot_file(SNAPSHOT);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(main_with(&args(&file, Some("/missing")), &mut out, &mut err), 0);
        assert_eq!(out, b"{\"error\":\"no such node: /missing\"}\n");
        assert!(err.is_empty());
    }
}
