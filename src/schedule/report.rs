// src/schedule/report.rs

//! Output of the schedule builder: chart rows plus non-fatal diagnostics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schedule::calendar::whole_days_between;
use crate::schedule::item::{ItemId, SchedulableItem, Timing};

/// Bars are never drawn shorter than this many days.
pub const MIN_DURATION_DAYS: i64 = 1;

/// One plottable timeline bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub id: ItemId,
    pub name: String,
    /// Whole days between the chart origin and `start`.
    pub start_offset_days: i64,
    /// Whole days from `start` to `end`, inclusive, at least [`MIN_DURATION_DAYS`].
    pub duration_days: i64,
    /// Computed start, not altered by the duration clamp.
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Timing fell back to the item's own dates because it sits on a cycle.
    pub cycle_broken: bool,
}

impl ChartRow {
    pub fn project(
        item: &SchedulableItem,
        timing: Timing,
        origin: DateTime<Utc>,
        cycle_broken: bool,
    ) -> Self {
        let start_offset_days = whole_days_between(origin, timing.start);
        let duration_days =
            (whole_days_between(timing.start, timing.end) + 1).max(MIN_DURATION_DAYS);

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            start_offset_days,
            duration_days,
            start: timing.start,
            end: timing.end,
            cycle_broken,
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            start: self.start,
            end: self.end,
        }
    }

    /// Whether dependencies pushed the start past the item's own end.
    pub fn is_overdue_by_dependencies(&self) -> bool {
        self.start > self.end
    }
}

/// Non-fatal conditions met while building a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleDiagnostic {
    /// No input item had a due date; the caller should render an empty state.
    NoPlottableItems,
    /// A dependency cycle was cut. Lists every member of the strongly
    /// connected component, in snapshot order.
    CycleBroken { cycle: Vec<ItemId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScheduleReport {
    /// Sorted ascending by computed start.
    pub rows: Vec<ChartRow>,
    pub diagnostics: Vec<ScheduleDiagnostic>,
}

impl ScheduleReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_no_plottable_items(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, ScheduleDiagnostic::NoPlottableItems))
    }

    /// All cycles that were broken, ordered by their first member.
    pub fn cycle_breaks(&self) -> Vec<&[ItemId]> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                ScheduleDiagnostic::CycleBroken { cycle } => Some(cycle.as_slice()),
                ScheduleDiagnostic::NoPlottableItems => None,
            })
            .collect()
    }

    pub fn row(&self, id: &str) -> Option<&ChartRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Earliest computed start, i.e. the day offsets are measured from here.
    pub fn origin(&self) -> Option<DateTime<Utc>> {
        self.rows.iter().map(|r| r.start).min()
    }

    /// Last day covered by any bar, measured in days from the origin.
    pub fn span_days(&self) -> i64 {
        self.rows
            .iter()
            .map(|r| r.start_offset_days + r.duration_days)
            .max()
            .unwrap_or(0)
    }
}
