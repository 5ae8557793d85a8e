//! # Status CLI Commands
//!
//! Read-only inspection of the records written by the status collector.
//!
//! ## Commands
//!
//! - `status <node>`: show one node's latest record and its trace.
//! - `list`: one line per record in the status directory.
//!
//! ## Output Format (`status`)
//!
//! ```text
//! Node:        node.example.com
//! Sequence:    7
//! Last Write:  2006-01-02T15:04:05Z
//! Match:       no
//!
//! > processing 2 pods
//! + ns-1/pod-1
//! + ns-2/pod-2
//! = <computed>
//! V <expected>
//! ```
//!
//! Reading never takes a lock: the collector replaces files by rename, so a
//! record is either the previous one or the new one.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use pfps_common::DurableRecord;
use pfps_storage::{list_records, read_record, StoreError};
use tracing::warn;

// ════════════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ════════════════════════════════════════════════════════════════════════════════

/// Handles `status <node> [--dir <path>] [--json]`.
///
/// ## Errors
///
/// Returns `Err` if the record is missing, corrupt, or unreadable.
pub fn handle_status(dir: &Path, node: &str, json: bool) -> Result<()> {
    let record = read_record(dir, node).map_err(|e| match e {
        StoreError::NotFound { .. } => anyhow::anyhow!(
            "no status recorded for node '{}' in '{}'",
            node,
            dir.display()
        ),
        other => anyhow::Error::new(other).context(format!("failed to read status for node '{}'", node)),
    })?;

    if json {
        let out = serde_json::to_string_pretty(&record).context("failed to encode record")?;
        println!("{}", out);
    } else {
        print!("{}", render_status(&record));
    }
    Ok(())
}

/// Handles `list [--dir <path>] [--json]`.
///
/// Corrupt files are reported but do not fail the command.
pub fn handle_list(dir: &Path, json: bool) -> Result<()> {
    let entries = list_records(dir)
        .with_context(|| format!("failed to list status directory '{}'", dir.display()))?;

    if json {
        let mut records = Vec::with_capacity(entries.len());
        for (stem, entry) in entries {
            match entry {
                Ok(rec) => records.push(rec),
                Err(e) => warn!("skipping {}: {}", stem, e),
            }
        }
        let out = serde_json::to_string_pretty(&records).context("failed to encode records")?;
        println!("{}", out);
    } else {
        print!("{}", render_list(&entries));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// RENDERING
// ════════════════════════════════════════════════════════════════════════════════

pub fn render_status(record: &DurableRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Node:        {}", record.node_name);
    let _ = writeln!(out, "Sequence:    {}", record.seq_no);
    let _ = writeln!(out, "Last Write:  {}", format_time(record));
    let _ = writeln!(out, "Match:       {}", if record.is_match() { "yes" } else { "no" });
    let _ = writeln!(out);
    out.push_str(&record.repr());
    out
}

pub fn render_list(entries: &[(String, Result<DurableRecord, StoreError>)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>8}  {:<30}  {:<5}  {:>5}  NODE", "SEQ", "LAST WRITE", "MATCH", "PODS");
    for (stem, entry) in entries {
        match entry {
            Ok(rec) => {
                let _ = writeln!(
                    out,
                    "{:>8}  {:<30}  {:<5}  {:>5}  {}",
                    rec.seq_no,
                    format_time(rec),
                    if rec.is_match() { "yes" } else { "no" },
                    rec.pods.len(),
                    rec.node_name,
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{:>8}  {:<30}  {:<5}  {:>5}  {} ({})", "-", "-", "-", "-", stem, e);
            }
        }
    }
    out
}

fn format_time(record: &DurableRecord) -> String {
    record.last_write.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ════════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════════
