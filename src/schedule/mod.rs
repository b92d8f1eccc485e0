// src/schedule/mod.rs

//! Dependency-resolved schedule computation for the Gantt view.
//!
//! - [`item`] holds the input records (tasks with dates and blockers).
//! - [`calendar`] does the day-granularity arithmetic.
//! - [`resolver`] walks the blocker graph and computes a start/end per task,
//!   breaking cycles instead of failing.
//! - [`builder`] projects those timings onto chart rows anchored at a common
//!   origin.
//! - [`report`] contains the output rows and non-fatal diagnostics.
//!
//! Nothing here performs IO or keeps state between calls.

pub mod builder;
pub mod calendar;
pub mod item;
pub mod report;
pub mod resolver;

use chrono::{FixedOffset, Offset, Utc};

pub use builder::{build_schedule, build_schedule_default};
pub use item::{DependencyLag, ItemId, SchedulableItem, Timing};
pub use report::{ChartRow, ScheduleDiagnostic, ScheduleReport};

/// Knobs that influence the computation itself (not its presentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// UTC offset whose calendar days are used for day truncation.
    pub day_offset: FixedOffset,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            day_offset: Utc.fix(),
        }
    }
}
