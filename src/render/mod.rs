// src/render/mod.rs

//! Presentation of a computed schedule on stdout.

pub mod table;

pub use table::render_table;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::schedule::ScheduleReport;
use crate::types::OutputFormat;

/// Pretty JSON of rows and diagnostics, for callers that draw the chart
/// themselves.
pub fn render_json(report: &ScheduleReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Render in the given format using the display settings from `cfg`.
pub fn render(report: &ScheduleReport, format: OutputFormat, cfg: &ConfigFile) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(
            report,
            cfg.output.bar_width,
            cfg.schedule.day_offset,
        )),
        OutputFormat::Json => render_json(report),
    }
}
