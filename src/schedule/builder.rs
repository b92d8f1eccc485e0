// src/schedule/builder.rs

use std::collections::HashSet;

use tracing::debug;

use crate::schedule::item::SchedulableItem;
use crate::schedule::report::{ChartRow, ScheduleDiagnostic, ScheduleReport};
use crate::schedule::resolver::resolve_timings;
use crate::schedule::ScheduleOptions;

/// Build the Gantt rows for a snapshot of items.
///
/// Only items with a due date produce rows. Each row's start honours its
/// blockers' ends (plus any configured lag); dependency cycles are cut and
/// reported as [`ScheduleDiagnostic::CycleBroken`]. Rows are sorted by
/// computed start, ties keeping input order.
///
/// This never fails: an input without any dated item yields no rows and a
/// [`ScheduleDiagnostic::NoPlottableItems`] diagnostic.
pub fn build_schedule(items: &[SchedulableItem], options: &ScheduleOptions) -> ScheduleReport {
    let resolution = resolve_timings(items, options.day_offset);

    let Some(origin) = resolution.timings.values().map(|t| t.start).min() else {
        debug!(items = items.len(), "no item has a due date; nothing to plot");
        return ScheduleReport {
            rows: Vec::new(),
            diagnostics: vec![ScheduleDiagnostic::NoPlottableItems],
        };
    };

    let mut emitted = HashSet::new();
    let mut rows: Vec<ChartRow> = items
        .iter()
        .filter(|item| item.is_schedulable())
        .filter(|item| emitted.insert(item.id.as_str()))
        .filter_map(|item| {
            let timing = resolution.timing_of(&item.id)?;
            Some(ChartRow::project(
                item,
                timing,
                origin,
                resolution.is_cyclic(&item.id),
            ))
        })
        .collect();

    // Stable: equal starts keep input order.
    rows.sort_by_key(|row| row.start);

    let diagnostics = resolution
        .cycles
        .into_iter()
        .map(|cycle| ScheduleDiagnostic::CycleBroken { cycle })
        .collect();

    debug!(rows = rows.len(), %origin, "built schedule");

    ScheduleReport { rows, diagnostics }
}

/// [`build_schedule`] with UTC day boundaries.
pub fn build_schedule_default(items: &[SchedulableItem]) -> ScheduleReport {
    build_schedule(items, &ScheduleOptions::default())
}
