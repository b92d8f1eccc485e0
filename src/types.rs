use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a computed schedule is written to stdout.
///
/// - `Table`: a text Gantt chart, one bar per scheduled task.
/// - `Json`: the rows and diagnostics as pretty-printed JSON, for callers that
///   render the chart themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Granularity of a dependency lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LagUnit {
    Hours,
    Days,
}

impl FromStr for LagUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "h" | "hour" | "hours" => Ok(LagUnit::Hours),
            "d" | "day" | "days" => Ok(LagUnit::Days),
            other => Err(format!(
                "invalid lag unit: {other} (expected \"hours\" or \"days\")"
            )),
        }
    }
}
