#![allow(dead_code)]

use chorey_schedule::schedule::{DependencyLag, SchedulableItem};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Midnight UTC of `2024-01-01` plus `n` days. Day numbers in tests read as
/// "day n" of a project.
pub fn day(n: i64) -> DateTime<Utc> {
    epoch() + TimeDelta::days(n)
}

/// `day(n)` plus `hours`.
pub fn day_at(n: i64, hours: i64) -> DateTime<Utc> {
    day(n) + TimeDelta::hours(hours)
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid epoch")
}

/// Builder for `SchedulableItem` to simplify test setup.
///
/// Defaults: created on day 0, due on day 1, no blockers.
pub struct ItemBuilder {
    item: SchedulableItem,
}

impl ItemBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            item: SchedulableItem::new(id, day(0), Some(day(1))),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.item.name = name.to_string();
        self
    }

    pub fn created(mut self, ts: DateTime<Utc>) -> Self {
        self.item.created_at = ts;
        self
    }

    pub fn created_day(self, n: i64) -> Self {
        self.created(day(n))
    }

    pub fn due(mut self, ts: DateTime<Utc>) -> Self {
        self.item.due_date = Some(ts);
        self
    }

    pub fn due_day(self, n: i64) -> Self {
        self.due(day(n))
    }

    pub fn undated(mut self) -> Self {
        self.item.due_date = None;
        self
    }

    pub fn blocked_by(mut self, blocker: &str) -> Self {
        self.item.blocked_by.push(blocker.to_string());
        self
    }

    /// Add `blocker` with a lag.
    pub fn blocked_by_with_lag(mut self, blocker: &str, lag: DependencyLag) -> Self {
        self.item.blocked_by.push(blocker.to_string());
        self.item.dependency_config.insert(blocker.to_string(), lag);
        self
    }

    pub fn build(self) -> SchedulableItem {
        self.item
    }
}

/// Builder for a snapshot (ordered list of items).
#[derive(Default)]
pub struct SnapshotBuilder {
    items: Vec<SchedulableItem>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: ItemBuilder) -> Self {
        self.items.push(item.build());
        self
    }

    pub fn with_item(mut self, item: SchedulableItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> Vec<SchedulableItem> {
        self.items
    }
}
