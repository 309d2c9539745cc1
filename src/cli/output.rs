//! CLI output: text and JSON rendering of snapshots, lookups and diffs.

use crate::error::ApiError;
use crate::tree::hasher;
use crate::tree::{FsTree, TreeDiff, TreeItem};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

fn describe_item(item: &TreeItem) -> String {
    if item.is_folder() {
        return format!("{}/", item.path().display());
    }
    let fingerprint = item.fingerprint();
    let modified = fingerprint
        .modified
        .map(|t| DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "{}  {} bytes  {}",
        item.path().display(),
        fingerprint.size,
        modified
    );
    if let Some(content) = &fingerprint.content {
        let _ = write!(line, "  {}", hasher::short_hex(content));
    }
    line
}

pub fn format_scan_text(tree: &FsTree, list: bool) -> String {
    let mut out = format!(
        "Root: {}\nFiles: {}\nFolders: {}\nBuild time: {} ms",
        tree.root_path().display(),
        tree.file_count(),
        tree.folder_count(),
        tree.build_time().as_millis()
    );
    if list {
        for item in tree.items() {
            out.push('\n');
            out.push_str(&describe_item(item));
        }
    }
    out
}

pub fn format_scan_json(tree: &FsTree, list: bool) -> Result<String, ApiError> {
    let mut value = json!({
        "root": tree.root_path(),
        "files": tree.file_count(),
        "folders": tree.folder_count(),
        "build_time_ms": tree.build_time().as_millis() as u64,
    });
    if list {
        let items: Vec<_> = tree
            .items()
            .iter()
            .map(|item| {
                json!({
                    "path": item.path(),
                    "kind": item.kind(),
                    "size": item.fingerprint().size,
                })
            })
            .collect();
        value["items"] = json!(items);
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn format_diff_text(diff: &TreeDiff) -> String {
    if diff.is_empty() {
        return "No changes".to_string();
    }
    let mut lines = Vec::with_capacity(diff.len());
    lines.extend(diff.added.iter().map(|p| format!("+ {}", p.display())));
    lines.extend(diff.removed.iter().map(|p| format!("- {}", p.display())));
    lines.extend(diff.modified.iter().map(|p| format!("~ {}", p.display())));
    lines.join("\n")
}

pub fn format_diff_json(diff: &TreeDiff) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(diff)?)
}

pub fn format_paths_text(paths: &[&Path]) -> String {
    if paths.is_empty() {
        return "No matches".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_paths_json(paths: &[&Path]) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&json!({ "paths": paths }))?)
}
