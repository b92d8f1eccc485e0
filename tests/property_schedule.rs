use std::collections::HashSet;

use chorey_schedule::schedule::calendar::{apply_lag, truncate_to_day};
use chorey_schedule::schedule::{build_schedule_default, DependencyLag, SchedulableItem};
use chorey_schedule_test_utils::builders::{day, day_at};
use chrono::{FixedOffset, Offset, Utc};
use proptest::prelude::*;

// Arbitrary snapshots, cycles and self-references included: any index may
// point at any other item.
fn snapshot_strategy(max_items: usize) -> impl Strategy<Value = Vec<SchedulableItem>> {
    (1..=max_items).prop_flat_map(|n| {
        let item = (
            0..30i64,                                        // created day
            0..12i64,                                        // created hour
            proptest::option::weighted(0.85, 0..40i64),      // due day
            proptest::collection::vec(0..n + 2, 0..4),       // blockers (may dangle)
            proptest::collection::vec((-3..4i64, any::<bool>()), 0..4), // lags
        );
        proptest::collection::vec(item, n).prop_map(move |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (created, hour, due, blockers, lags))| {
                    let mut item = SchedulableItem::new(
                        format!("t{i}"),
                        day_at(created, hour),
                        due.map(day),
                    );
                    for (j, blocker) in blockers.into_iter().enumerate() {
                        let blocker_id = format!("t{blocker}");
                        if let Some(&(lag, in_days)) = lags.get(j) {
                            let lag = if in_days {
                                DependencyLag::days(lag)
                            } else {
                                DependencyLag::hours(lag * 10)
                            };
                            item.dependency_config.insert(blocker_id.clone(), lag);
                        }
                        item.blocked_by.push(blocker_id);
                    }
                    item
                })
                .collect()
        })
    })
}

fn utc() -> FixedOffset {
    Utc.fix()
}

proptest! {
    #[test]
    fn test_rows_are_well_formed(items in snapshot_strategy(12)) {
        let report = build_schedule_default(&items);

        let dated: HashSet<&str> = items
            .iter()
            .filter(|i| i.due_date.is_some())
            .map(|i| i.id.as_str())
            .collect();
        prop_assert_eq!(report.rows.len(), dated.len());

        if dated.is_empty() {
            prop_assert!(report.has_no_plottable_items());
            return Ok(());
        }

        let min_offset = report.rows.iter().map(|r| r.start_offset_days).min();
        prop_assert_eq!(min_offset, Some(0));

        for pair in report.rows.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }

        for row in &report.rows {
            prop_assert!(row.start_offset_days >= 0);
            prop_assert!(row.duration_days >= 1);
        }
    }

    #[test]
    fn test_starts_respect_blockers(items in snapshot_strategy(12)) {
        let report = build_schedule_default(&items);

        for item in items.iter().filter(|i| i.due_date.is_some()) {
            let row = report.row(&item.id).unwrap();
            prop_assert!(row.start >= truncate_to_day(item.created_at, utc()));

            if row.cycle_broken {
                prop_assert_eq!(row.start, truncate_to_day(item.created_at, utc()));
                continue;
            }

            for blocker in &item.blocked_by {
                let Some(blocker_row) = report.row(blocker) else {
                    continue;
                };
                let candidate = match item.lag_for(blocker) {
                    Some(lag) => apply_lag(blocker_row.end, lag),
                    None => blocker_row.end,
                };
                prop_assert!(row.start >= candidate);
            }
        }
    }

    #[test]
    fn test_builds_are_deterministic(items in snapshot_strategy(10)) {
        let first = build_schedule_default(&items);
        let second = build_schedule_default(&items);
        prop_assert_eq!(first, second);
    }
}
