// src/dag/check.rs

//! Human-oriented summary of dependency problems in a snapshot.

use std::fmt;

use crate::dag::graph::DependencyGraph;
use crate::schedule::{ItemId, SchedulableItem};

/// What `--check` reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyReport {
    pub scheduled: usize,
    pub cycles: Vec<Vec<ItemId>>,
    pub dangling: Vec<(ItemId, ItemId)>,
    pub undated: Vec<ItemId>,
}

impl DependencyReport {
    /// Cycles are the only problem that changes computed dates in a way
    /// users usually do not expect; dangling blockers are merely ignored.
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty() && self.dangling.is_empty()
    }
}

pub fn check_dependencies(items: &[SchedulableItem]) -> DependencyReport {
    let graph = DependencyGraph::from_items(items);
    DependencyReport {
        scheduled: graph.items().count(),
        cycles: graph.cycles(),
        dangling: graph.dangling_references().to_vec(),
        undated: graph.undated_items().to_vec(),
    }
}

impl fmt::Display for DependencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chorey-schedule dependency check")?;
        writeln!(f, "  scheduled items: {}", self.scheduled)?;

        if !self.undated.is_empty() {
            writeln!(f, "  without due date (not scheduled): {:?}", self.undated)?;
        }

        if self.cycles.is_empty() {
            writeln!(f, "  cycles: none")?;
        } else {
            writeln!(f, "  cycles ({}):", self.cycles.len())?;
            for cycle in &self.cycles {
                writeln!(f, "    - {}", cycle.join(" <-> "))?;
            }
        }

        if self.dangling.is_empty() {
            write!(f, "  dangling blockers: none")
        } else {
            write!(f, "  dangling blockers ({}):", self.dangling.len())?;
            for (item, blocker) in &self.dangling {
                write!(f, "\n    - {item} blocked by missing/undated '{blocker}'")?;
            }
            Ok(())
        }
    }
}
