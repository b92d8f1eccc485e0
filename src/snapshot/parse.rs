// src/snapshot/parse.rs

//! Conversion of raw snapshot values into typed schedule inputs.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::errors::{ChoreyError, Result};
use crate::schedule::{DependencyLag, ItemId, SchedulableItem};
use crate::snapshot::model::{RawLag, RawTimestamp};
use crate::types::LagUnit;

/// `2d`, `-36h`, `3 days`, `1 hour`.
const LAG_SHORTHAND: &str = r"^\s*([+-]?\d+)\s*([A-Za-z]+)\s*$";

/// Everything needed to turn raw task fields into a [`SchedulableItem`].
///
/// Compiles the lag shorthand pattern once per snapshot.
pub struct ItemParser {
    lag_shorthand: Regex,
}

/// Fields common to both snapshot formats.
pub struct RawItemFields {
    pub id: String,
    pub name: Option<String>,
    pub created_at: RawTimestamp,
    pub due_date: Option<RawTimestamp>,
    pub blocked_by: Vec<String>,
    pub dependency_config: BTreeMap<String, RawLag>,
}

impl ItemParser {
    pub fn new() -> Result<Self> {
        let lag_shorthand = Regex::new(LAG_SHORTHAND).map_err(anyhow::Error::from)?;
        Ok(Self { lag_shorthand })
    }

    pub fn parse_item(&self, raw: RawItemFields) -> Result<SchedulableItem> {
        let id = raw.id.trim().to_string();
        if id.is_empty() {
            return Err(ChoreyError::SnapshotError(
                "task id must not be empty".to_string(),
            ));
        }

        let created_at = parse_timestamp(&raw.created_at)
            .map_err(|e| field_error(&id, "created_at", e))?;
        let due_date = raw
            .due_date
            .as_ref()
            .map(parse_timestamp)
            .transpose()
            .map_err(|e| field_error(&id, "due_date", e))?;

        let mut dependency_config: BTreeMap<ItemId, DependencyLag> = BTreeMap::new();
        for (blocker, lag) in raw.dependency_config {
            let blocker = blocker.trim();
            let parsed = self
                .parse_lag(&lag)
                .map_err(|e| field_error(&id, &format!("dependency_config.{blocker}"), e))?;
            dependency_config.insert(blocker.to_string(), parsed);
        }

        // References are matched against trimmed ids.
        let blocked_by = raw
            .blocked_by
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();

        Ok(SchedulableItem {
            name: raw.name.unwrap_or_else(|| id.clone()),
            id,
            created_at,
            due_date,
            blocked_by,
            dependency_config,
        })
    }

    pub fn parse_lag(&self, raw: &RawLag) -> std::result::Result<DependencyLag, String> {
        match raw {
            RawLag::Structured { lag, unit } => Ok(DependencyLag {
                lag: *lag,
                unit: *unit,
            }),
            RawLag::Shorthand(s) => {
                let caps = self
                    .lag_shorthand
                    .captures(s)
                    .ok_or_else(|| format!("invalid lag {s:?} (expected e.g. \"2d\" or \"-36h\")"))?;
                let lag = caps[1]
                    .parse::<i64>()
                    .map_err(|e| format!("invalid lag amount in {s:?}: {e}"))?;
                let unit = caps[2].parse::<LagUnit>()?;
                Ok(DependencyLag { lag, unit })
            }
        }
    }
}

/// Parse one timestamp encoding into UTC.
pub fn parse_timestamp(raw: &RawTimestamp) -> std::result::Result<DateTime<Utc>, String> {
    match raw {
        RawTimestamp::Text(s) => parse_timestamp_str(s),
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms)
            .ok_or_else(|| format!("epoch milliseconds out of range: {ms}")),
        RawTimestamp::Seconds {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(*seconds, *nanoseconds)
            .ok_or_else(|| format!("epoch seconds out of range: {seconds}")),
    }
}

fn parse_timestamp_str(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!(
        "invalid timestamp {s:?} (expected RFC 3339 or YYYY-MM-DD)"
    ))
}

fn field_error(id: &str, field: &str, msg: String) -> ChoreyError {
    ChoreyError::SnapshotError(format!("task '{id}': {field}: {msg}"))
}
