// src/snapshot/model.rs

//! Serde shapes of the snapshot files, before timestamps and lags are parsed.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::LagUnit;

/// TOML snapshot: one `[task.<id>]` table per task.
///
/// ```toml
/// [task.design]
/// name = "Design"
/// created_at = "2024-03-01T09:00:00Z"
/// due_date = "2024-03-05"
/// blocked_by = ["research"]
///
/// [task.design.dependency_config]
/// research = { lag = 2, unit = "days" }
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTomlSnapshot {
    #[serde(default)]
    pub task: BTreeMap<String, RawTomlTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTomlTask {
    /// Display label; defaults to the table key.
    #[serde(default)]
    pub name: Option<String>,

    pub created_at: RawTimestamp,

    #[serde(default)]
    pub due_date: Option<RawTimestamp>,

    #[serde(default)]
    pub blocked_by: Vec<String>,

    #[serde(default)]
    pub dependency_config: BTreeMap<String, RawLag>,
}

/// JSON snapshot as exported from the task store.
///
/// Accepts `{ "tasks": [...] }` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawJsonSnapshot {
    Wrapped { tasks: Vec<RawJsonTask> },
    Bare(Vec<RawJsonTask>),
}

impl RawJsonSnapshot {
    pub fn into_tasks(self) -> Vec<RawJsonTask> {
        match self {
            RawJsonSnapshot::Wrapped { tasks } => tasks,
            RawJsonSnapshot::Bare(tasks) => tasks,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJsonTask {
    pub id: String,

    #[serde(default, alias = "name")]
    pub title: Option<String>,

    pub created_at: RawTimestamp,

    #[serde(default)]
    pub due_date: Option<RawTimestamp>,

    #[serde(default)]
    pub blocked_by: Option<Vec<String>>,

    #[serde(default)]
    pub dependency_config: Option<BTreeMap<String, RawLag>>,
}

/// A timestamp in any of the accepted encodings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or `YYYY-MM-DD`.
    Text(String),
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// Document-store timestamp object.
    Seconds {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

/// A dependency lag, either structured or as shorthand like `"2d"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawLag {
    Structured { lag: i64, unit: LagUnit },
    Shorthand(String),
}
