// src/schedule/item.rs

//! Input records for the schedule builder.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::calendar::truncate_to_day;
use crate::types::LagUnit;

/// Canonical task identifier type used throughout the crate.
pub type ItemId = String;

/// Offset applied after a blocker's end before it constrains a dependent.
///
/// Negative values are allowed and pull the dependent earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyLag {
    pub lag: i64,
    pub unit: LagUnit,
}

impl DependencyLag {
    pub fn hours(lag: i64) -> Self {
        Self {
            lag,
            unit: LagUnit::Hours,
        }
    }

    pub fn days(lag: i64) -> Self {
        Self {
            lag,
            unit: LagUnit::Days,
        }
    }

    /// The lag as a time delta, or `None` if it does not fit chrono's range.
    pub fn as_delta(&self) -> Option<TimeDelta> {
        match self.unit {
            LagUnit::Hours => TimeDelta::try_hours(self.lag),
            LagUnit::Days => TimeDelta::try_days(self.lag),
        }
    }
}

/// A task as seen by the schedule builder.
///
/// Only items with a `due_date` take part in scheduling; the rest are
/// invisible, including as blockers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulableItem {
    pub id: ItemId,
    /// Display label carried through to the chart row.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    /// Tasks that must finish before this one may start, in declaration order.
    pub blocked_by: Vec<ItemId>,
    /// Per-blocker lag, keyed by the blocker's id.
    pub dependency_config: BTreeMap<ItemId, DependencyLag>,
}

impl SchedulableItem {
    /// Create an item with no blockers whose label is its id.
    pub fn new(
        id: impl Into<ItemId>,
        created_at: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            created_at,
            due_date,
            blocked_by: Vec::new(),
            dependency_config: BTreeMap::new(),
        }
    }

    pub fn is_schedulable(&self) -> bool {
        self.due_date.is_some()
    }

    /// Lag configured for `blocker`, if any.
    pub fn lag_for(&self, blocker: &str) -> Option<&DependencyLag> {
        self.dependency_config.get(blocker)
    }
}

/// Computed start/end of one scheduled item.
///
/// `end >= start` is not guaranteed: a dependency chain can push `start` past
/// the item's own due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timing {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Timing {
    /// The item's own creation and due dates, day-truncated.
    ///
    /// Used as-is for items whose dependencies form a cycle. Returns `None`
    /// for items without a due date.
    pub fn own_dates(item: &SchedulableItem, offset: FixedOffset) -> Option<Self> {
        let due = item.due_date?;
        Some(Self {
            start: truncate_to_day(item.created_at, offset),
            end: truncate_to_day(due, offset),
        })
    }
}
