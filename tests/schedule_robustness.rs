use chorey_schedule::schedule::calendar::truncate_to_day;
use chorey_schedule::schedule::{
    build_schedule, build_schedule_default, ScheduleDiagnostic, ScheduleOptions,
};
use chorey_schedule::config::parse_utc_offset;
use chorey_schedule_test_utils::builders::{day, ItemBuilder, SnapshotBuilder};
use chorey_schedule_test_utils::init_tracing;
use chrono::{DateTime, Utc};

fn tangled(order: &[&str]) -> Vec<chorey_schedule::schedule::SchedulableItem> {
    order
        .iter()
        .fold(SnapshotBuilder::new(), |snapshot, id| {
            let item = match *id {
                "R" => ItemBuilder::new("R")
                    .created_day(0)
                    .due_day(2)
                    .blocked_by("M1")
                    .blocked_by("M2"),
                "M1" => ItemBuilder::new("M1").created_day(1).due_day(5).blocked_by("R"),
                "M2" => ItemBuilder::new("M2").created_day(2).due_day(7).blocked_by("M1"),
                _ => ItemBuilder::new("after").created_day(0).due_day(9).blocked_by("M2"),
            };
            snapshot.with(item)
        })
        .build()
}

#[test]
fn test_cycle_handling_does_not_depend_on_snapshot_order() {
    init_tracing();

    let forward = build_schedule_default(&tangled(&["R", "M1", "M2", "after"]));
    let backward = build_schedule_default(&tangled(&["after", "M2", "M1", "R"]));

    for id in ["R", "M1", "M2", "after"] {
        let a = forward.row(id).unwrap();
        let b = backward.row(id).unwrap();
        assert_eq!(a.timing(), b.timing(), "timing of {id}");
        assert_eq!(a.cycle_broken, b.cycle_broken, "cycle flag of {id}");
    }

    // R, M1 and M2 form one strongly connected component.
    let m2 = forward.row("M2").unwrap();
    assert!(m2.cycle_broken);
    assert_eq!((m2.start, m2.end), (day(2), day(7)));
    assert!(!forward.row("after").unwrap().cycle_broken);
    assert_eq!(forward.row("after").unwrap().start, day(7));

    let ids = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    assert_eq!(
        forward.diagnostics,
        vec![ScheduleDiagnostic::CycleBroken {
            cycle: ids(&["R", "M1", "M2"]),
        }]
    );
    assert_eq!(
        backward.diagnostics,
        vec![ScheduleDiagnostic::CycleBroken {
            cycle: ids(&["M2", "M1", "R"]),
        }]
    );
}

#[test]
fn test_long_chain_resolves_without_recursion() {
    const LEN: i64 = 100_000;

    let mut snapshot = SnapshotBuilder::new();
    for i in 0..LEN {
        let mut item = ItemBuilder::new(&format!("t{i}")).created_day(0).due_day(i + 1);
        if i > 0 {
            item = item.blocked_by(&format!("t{}", i - 1));
        }
        snapshot = snapshot.with(item);
    }
    let items = snapshot.build();

    // Run on a small stack so a recursive walk would fail loudly.
    let report = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(move || build_schedule_default(&items))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(report.rows.len(), LEN as usize);
    assert!(report.diagnostics.is_empty());
    let last = report.row(&format!("t{}", LEN - 1)).unwrap();
    assert_eq!(last.start, day(LEN - 1));
    assert_eq!(last.start_offset_days, LEN - 1);
}

#[test]
fn test_dates_at_the_edge_of_the_calendar() {
    init_tracing();

    let items = SnapshotBuilder::new()
        .with(
            ItemBuilder::new("edge")
                .created(DateTime::<Utc>::MIN_UTC)
                .due(DateTime::<Utc>::MAX_UTC),
        )
        .build();

    for offset in ["+02:00", "-05:00", "+00:00"] {
        let options = ScheduleOptions {
            day_offset: parse_utc_offset(offset).unwrap(),
        };
        let report = build_schedule(&items, &options);
        let row = report.row("edge").unwrap();
        assert!(row.duration_days > 1, "offset {offset}");
        assert_eq!(row.start_offset_days, 0);
    }
}

#[test]
fn test_truncation_keeps_unrepresentable_days_unchanged() {
    let east = parse_utc_offset("+02:00").unwrap();
    let west = parse_utc_offset("-05:00").unwrap();

    assert_eq!(truncate_to_day(DateTime::<Utc>::MAX_UTC, east), DateTime::<Utc>::MAX_UTC);
    assert_eq!(truncate_to_day(DateTime::<Utc>::MIN_UTC, west), DateTime::<Utc>::MIN_UTC);

    // Still a real truncation away from the edges.
    assert_eq!(truncate_to_day(day(3) + chrono::TimeDelta::hours(23), east), day(4) - chrono::TimeDelta::hours(2));
}
