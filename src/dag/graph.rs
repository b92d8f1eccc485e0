// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::schedule::{ItemId, SchedulableItem};

/// Blocker graph over the schedulable (dated) items of a snapshot.
///
/// Edge direction: blocker -> dependent. For
///
/// ```toml
/// [task.B]
/// blocked_by = ["A"]
/// ```
///
/// we add edge A -> B. The schedule builder uses it to find the items whose
/// timing must fall back to their own dates; `--check` uses it to report them.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<ItemId, ()>,
    index: HashMap<ItemId, NodeIndex>,
    /// `(item, blocker)` pairs whose blocker is missing or has no due date.
    dangling: Vec<(ItemId, ItemId)>,
    /// Items left out of the graph because they have no due date.
    undated: Vec<ItemId>,
}

impl DependencyGraph {
    pub fn from_items(items: &[SchedulableItem]) -> Self {
        let mut graph = DiGraph::new();
        let mut index: HashMap<ItemId, NodeIndex> = HashMap::new();
        let mut undated = Vec::new();

        // First pass: one node per dated item (first occurrence wins).
        for item in items {
            if !item.is_schedulable() {
                undated.push(item.id.clone());
                continue;
            }
            if !index.contains_key(&item.id) {
                let node = graph.add_node(item.id.clone());
                index.insert(item.id.clone(), node);
            }
        }

        // Second pass: edges from each blocker to its dependent. Later
        // duplicates of an id contribute nothing.
        let mut dangling = Vec::new();
        let mut seen = HashSet::new();
        for item in items.iter().filter(|i| i.is_schedulable()) {
            if !seen.insert(item.id.as_str()) {
                continue;
            }
            let Some(&to) = index.get(&item.id) else {
                continue;
            };
            for blocker in &item.blocked_by {
                match index.get(blocker) {
                    Some(&from) => {
                        graph.update_edge(from, to, ());
                    }
                    None => dangling.push((item.id.clone(), blocker.clone())),
                }
            }
        }

        Self {
            graph,
            index,
            dangling,
            undated,
        }
    }

    /// Item ids in the graph, in snapshot order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|s| s.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Immediate in-graph blockers of an item.
    pub fn blockers_of(&self, id: &str) -> Vec<ItemId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Immediate in-graph dependents of an item.
    pub fn dependents_of(&self, id: &str) -> Vec<ItemId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Items with no in-graph blockers.
    pub fn roots(&self) -> Vec<ItemId> {
        self.graph
            .node_indices()
            .filter(|&n| {
                self.graph
                    .neighbors_directed(n, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Strongly connected components that contain a cycle, members and
    /// components both in snapshot order.
    ///
    /// Self-blocking items count as one-item components. Membership does not
    /// depend on snapshot order, only the listing does.
    pub fn cyclic_components(&self) -> Vec<Vec<ItemId>> {
        // Kosaraju here is iterative, so long chains cannot exhaust the stack.
        let mut components: Vec<Vec<NodeIndex>> = kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        components.sort_by_key(|scc| scc[0]);
        components
            .into_iter()
            .map(|scc| scc.into_iter().map(|n| self.graph[n].clone()).collect())
            .collect()
    }

    /// Every dependency cycle, each as a sorted list of member ids.
    ///
    /// The outer list is sorted too, so the result does not depend on
    /// snapshot order.
    pub fn cycles(&self) -> Vec<Vec<ItemId>> {
        let mut cycles = self.cyclic_components();
        for members in &mut cycles {
            members.sort();
        }
        cycles.sort();
        cycles
    }

    /// A blockers-first order of all items, or `None` if there is a cycle.
    pub fn topological_order(&self) -> Option<Vec<ItemId>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|n| self.graph[n].clone()).collect())
    }

    pub fn dangling_references(&self) -> &[(ItemId, ItemId)] {
        &self.dangling
    }

    pub fn undated_items(&self) -> &[ItemId] {
        &self.undated
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<ItemId> {
        let Some(&node) = self.index.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<ItemId> = self
            .graph
            .neighbors_directed(node, dir)
            .map(|n| self.graph[n].clone())
            .collect();
        out.sort();
        out
    }
}
