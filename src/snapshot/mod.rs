// src/snapshot/mod.rs

//! Loading task snapshots from disk.
//!
//! A snapshot is the caller-owned, consistent set of tasks the schedule is
//! computed from. Two file formats are accepted, chosen by extension:
//! - `.toml`: `[task.<id>]` tables (see [`model::RawTomlSnapshot`]),
//! - `.json`: the task store export (see [`model::RawJsonSnapshot`]).
//!
//! Blocker references are not checked here; the builder ignores dangling
//! ones and `--check` reports them.

pub mod model;
pub mod parse;

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::errors::{ChoreyError, Result};
use crate::fs::FileSystem;
use crate::schedule::SchedulableItem;
use crate::snapshot::model::{RawJsonSnapshot, RawTomlSnapshot};
use crate::snapshot::parse::{ItemParser, RawItemFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Toml,
    Json,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("toml") => Ok(SnapshotFormat::Toml),
            Some("json") => Ok(SnapshotFormat::Json),
            _ => Err(ChoreyError::SnapshotError(format!(
                "unsupported snapshot file {:?} (expected .toml or .json)",
                path
            ))),
        }
    }
}

/// Read and parse a snapshot file.
pub fn load_snapshot(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Vec<SchedulableItem>> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let contents = fs.read_to_string(path)?;
    let items = parse_snapshot(&contents, format)?;
    debug!(path = ?path, items = items.len(), "loaded snapshot");
    Ok(items)
}

/// Parse snapshot text in the given format.
pub fn parse_snapshot(contents: &str, format: SnapshotFormat) -> Result<Vec<SchedulableItem>> {
    let parser = ItemParser::new()?;

    let fields: Vec<RawItemFields> = match format {
        SnapshotFormat::Toml => {
            let raw: RawTomlSnapshot = toml::from_str(contents)?;
            // Distinct keys can still collide once trimmed.
            ensure_unique_ids(raw.task.keys().map(String::as_str))?;
            raw.task
                .into_iter()
                .map(|(id, t)| RawItemFields {
                    id,
                    name: t.name,
                    created_at: t.created_at,
                    due_date: t.due_date,
                    blocked_by: t.blocked_by,
                    dependency_config: t.dependency_config,
                })
                .collect()
        }
        SnapshotFormat::Json => {
            let raw: RawJsonSnapshot = serde_json::from_str(contents)?;
            let tasks = raw.into_tasks();
            ensure_unique_ids(tasks.iter().map(|t| t.id.as_str()))?;
            tasks
                .into_iter()
                .map(|t| RawItemFields {
                    id: t.id,
                    name: t.title,
                    created_at: t.created_at,
                    due_date: t.due_date,
                    blocked_by: t.blocked_by.unwrap_or_default(),
                    dependency_config: t.dependency_config.unwrap_or_default(),
                })
                .collect()
        }
    };

    fields
        .into_iter()
        .map(|f| parser.parse_item(f))
        .collect()
}

fn ensure_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.trim()) {
            return Err(ChoreyError::SnapshotError(format!(
                "duplicate task id '{}'",
                id.trim()
            )));
        }
    }
    Ok(())
}
