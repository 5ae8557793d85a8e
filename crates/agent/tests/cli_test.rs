//! CLI Integration Tests
//!
//! Runs the built `pfps-agent` binary against records in a temp directory.

use std::path::Path;
use std::process::{Command, Output};

use chrono::{TimeZone, Utc};
use pfps_common::{DurableRecord, WorkloadIdentity};
use pfps_storage::write_record;
use tempfile::TempDir;

fn run_agent(args: &[&str], status_dump: Option<&Path>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pfps-agent"));
    cmd.args(args).env_remove("PFP_STATUS_DUMP");
    if let Some(dir) = status_dump {
        cmd.env("PFP_STATUS_DUMP", dir);
    }
    cmd.output().expect("failed to execute pfps-agent in test")
}

fn seed(dir: &Path, node: &str, seq_no: u64) {
    let rec = DurableRecord {
        node_name: node.to_string(),
        fingerprint_expected: "pfp0v001aa".to_string(),
        fingerprint_computed: "pfp0v001aa".to_string(),
        pods: vec![WorkloadIdentity::new("kube-system", "coredns-0")],
        last_write: Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        seq_no,
    };
    write_record(dir, node, &rec).expect("seed record");
}

// ════════════════════════════════════════════════════════════════════════════
// HELP TEXT
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_main_help() {
    let output = run_agent(&["--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("PFPS Agent CLI"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("list"));
}

#[test]
fn test_status_help_mentions_env() {
    let output = run_agent(&["status", "--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("PFP_STATUS_DUMP"));
}

// ════════════════════════════════════════════════════════════════════════════
// STATUS / LIST
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn test_status_reads_record_from_dir_flag() {
    let tmp = TempDir::new().expect("tmpdir");
    seed(tmp.path(), "worker-1.example.com", 42);

    let dir = tmp.path().to_string_lossy().to_string();
    let output = run_agent(&["status", "worker-1.example.com", "--dir", &dir], None);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Sequence:    42"));
    assert!(stdout.contains("Match:       yes"));
    assert!(stdout.contains("+ kube-system/coredns-0"));
}

#[test]
fn test_status_json_uses_env_directory() {
    let tmp = TempDir::new().expect("tmpdir");
    seed(tmp.path(), "worker-2.example.com", 7);

    let output = run_agent(&["status", "worker-2.example.com", "--json"], Some(tmp.path()));
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["nodeName"], "worker-2.example.com");
    assert_eq!(value["seqNo"], 7);
    assert_eq!(value["pods"][0]["Namespace"], "kube-system");
}

#[test]
fn test_status_unknown_node_fails() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path().to_string_lossy().to_string();
    let output = run_agent(&["status", "nobody", "--dir", &dir], None);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no status recorded"));
}

#[test]
fn test_list_shows_every_node() {
    let tmp = TempDir::new().expect("tmpdir");
    seed(tmp.path(), "a.example.com", 1);
    seed(tmp.path(), "b.example.com", 2);

    let dir = tmp.path().to_string_lossy().to_string();
    let output = run_agent(&["list", "--dir", &dir, "--json"], None);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    let nodes: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["nodeName"].as_str())
        .collect();
    assert_eq!(nodes, vec!["a.example.com", "b.example.com"]);
}
