// src/render/table.rs

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};

use crate::schedule::{ChartRow, ScheduleDiagnostic, ScheduleReport};

/// Longest label printed before it is cut.
const MAX_LABEL_WIDTH: usize = 24;

/// Render a text Gantt chart.
///
/// Bars are scaled so the whole schedule fits into `bar_width` columns; when
/// it already fits, one column is one day. Dates are shown in `offset`.
pub fn render_table(report: &ScheduleReport, bar_width: usize, offset: FixedOffset) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("no plottable items (no task has a due date)\n");
        push_diagnostics(&mut out, report);
        return out;
    }

    let span = report.span_days().max(1);
    let scale = if span as usize <= bar_width {
        1.0
    } else {
        bar_width as f64 / span as f64
    };

    let label_width = report
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(4, MAX_LABEL_WIDTH);

    if let Some(origin) = report.origin() {
        let _ = writeln!(
            out,
            "{} task(s) from {} over {} day(s)",
            report.rows.len(),
            format_day(origin, offset),
            span
        );
    }
    let _ = writeln!(
        out,
        "{:<label_width$}  {:<10}  {:<10}  chart",
        "task", "start", "end"
    );

    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:<label_width$}  {}  {}  {}{}",
            truncate_label(&row.name, label_width),
            format_day(row.start, offset),
            format_day(row.end, offset),
            bar(row, scale, bar_width),
            row_flags(row),
        );
    }

    push_diagnostics(&mut out, report);
    out
}

fn bar(row: &ChartRow, scale: f64, bar_width: usize) -> String {
    let lead = ((row.start_offset_days as f64) * scale).floor() as usize;
    let lead = lead.min(bar_width.saturating_sub(1));
    let len = ((row.duration_days as f64) * scale).round().max(1.0) as usize;
    let len = len.min(bar_width - lead);

    let mut s = " ".repeat(lead);
    s.push_str(&"#".repeat(len));
    s.push_str(&" ".repeat(bar_width - lead - len));
    s
}

fn row_flags(row: &ChartRow) -> &'static str {
    match (row.cycle_broken, row.is_overdue_by_dependencies()) {
        (true, _) => "  (cycle)",
        (false, true) => "  (blocked past due)",
        (false, false) => "",
    }
}

fn push_diagnostics(out: &mut String, report: &ScheduleReport) {
    for diagnostic in &report.diagnostics {
        if let ScheduleDiagnostic::CycleBroken { cycle } = diagnostic {
            let _ = writeln!(
                out,
                "warning: dependency cycle broken among: {}",
                cycle.join(", ")
            );
        }
    }
}

fn format_day(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%Y-%m-%d").to_string()
}

fn truncate_label(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
