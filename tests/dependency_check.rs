use chorey_schedule::dag::{check_dependencies, DependencyGraph};
use chorey_schedule_test_utils::builders::{ItemBuilder, SnapshotBuilder};

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_acyclic_graph() {
    let items = SnapshotBuilder::new()
        .with(ItemBuilder::new("A"))
        .with(ItemBuilder::new("B").blocked_by("A"))
        .with(ItemBuilder::new("C").blocked_by("A").blocked_by("B"))
        .build();

    let graph = DependencyGraph::from_items(&items);

    assert!(graph.cycles().is_empty());
    assert_eq!(graph.roots(), ids(&["A"]));
    assert_eq!(graph.blockers_of("C"), ids(&["A", "B"]));
    assert_eq!(graph.dependents_of("A"), ids(&["B", "C"]));
    assert_eq!(graph.topological_order(), Some(ids(&["A", "B", "C"])));
}

#[test]
fn test_cycles_and_self_loops() {
    let items = SnapshotBuilder::new()
        .with(ItemBuilder::new("B").blocked_by("A"))
        .with(ItemBuilder::new("A").blocked_by("B"))
        .with(ItemBuilder::new("S").blocked_by("S"))
        .with(ItemBuilder::new("free"))
        .build();

    let graph = DependencyGraph::from_items(&items);

    assert_eq!(graph.cycles(), vec![ids(&["A", "B"]), ids(&["S"])]);
    assert_eq!(graph.topological_order(), None);
    assert_eq!(graph.roots(), ids(&["free"]));
}

#[test]
fn test_dangling_and_undated() {
    let items = SnapshotBuilder::new()
        .with(ItemBuilder::new("draft").undated())
        .with(ItemBuilder::new("A").blocked_by("draft").blocked_by("deleted"))
        .build();

    let report = check_dependencies(&items);

    assert_eq!(report.scheduled, 1);
    assert!(!report.has_cycles());
    assert!(!report.is_clean());
    assert_eq!(
        report.dangling,
        vec![
            ("A".to_string(), "draft".to_string()),
            ("A".to_string(), "deleted".to_string()),
        ]
    );
    assert_eq!(report.undated, ids(&["draft"]));
    assert!(!DependencyGraph::from_items(&items).contains("draft"));
}

#[test]
fn test_report_display() {
    let items = SnapshotBuilder::new()
        .with(ItemBuilder::new("A").blocked_by("B"))
        .with(ItemBuilder::new("B").blocked_by("A"))
        .build();

    let text = check_dependencies(&items).to_string();

    assert!(text.contains("scheduled items: 2"));
    assert!(text.contains("cycles (1):"));
    assert!(text.contains("A <-> B"));
    assert!(text.contains("dangling blockers: none"));
}

#[test]
fn test_later_duplicate_adds_no_edges() {
    let items = SnapshotBuilder::new()
        .with(ItemBuilder::new("A"))
        .with(ItemBuilder::new("B"))
        .with(ItemBuilder::new("A").blocked_by("B"))
        .build();

    let graph = DependencyGraph::from_items(&items);

    assert!(graph.blockers_of("A").is_empty());
    assert_eq!(graph.roots(), ids(&["A", "B"]));
    assert!(graph.cyclic_components().is_empty());
}
