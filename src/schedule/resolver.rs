// src/schedule/resolver.rs

//! Memoized depth-first resolution of item timings over the blocker graph.
//!
//! Cycles are found up front as strongly connected components of the
//! [`DependencyGraph`]. Their members are timed by their own dates, which
//! leaves the rest of the graph acyclic; the walk over it keeps an explicit
//! stack of frames, so chain length is bounded by memory, not by the thread
//! stack.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, trace, warn};

use crate::dag::DependencyGraph;
use crate::schedule::calendar::{apply_lag, truncate_to_day};
use crate::schedule::item::{ItemId, SchedulableItem, Timing};

/// Result of resolving every schedulable item of one snapshot.
///
/// Borrowed from the input items; lives only as long as one build.
#[derive(Debug, Default)]
pub struct Resolution<'a> {
    pub timings: HashMap<&'a str, Timing>,
    /// Items whose timing fell back to their own dates.
    pub cyclic: HashSet<&'a str>,
    /// Members of each broken cycle, in snapshot order.
    pub cycles: Vec<Vec<ItemId>>,
}

impl Resolution<'_> {
    pub fn timing_of(&self, id: &str) -> Option<Timing> {
        self.timings.get(id).copied()
    }

    pub fn is_cyclic(&self, id: &str) -> bool {
        self.cyclic.contains(id)
    }
}

/// Per-invocation walk state. Nothing here outlives [`resolve_timings`].
struct Walk<'a> {
    lookup: HashMap<&'a str, &'a SchedulableItem>,
    offset: FixedOffset,
    cyclic: HashSet<&'a str>,
    memo: HashMap<&'a str, Timing>,
    /// Ids with a frame on the stack.
    on_stack: HashSet<&'a str>,
}

/// One item being resolved: which blocker to look at next and the latest
/// candidate start seen so far.
struct Frame<'a> {
    item: &'a SchedulableItem,
    next_blocker: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

enum Step<'a> {
    Finished(&'a str, Timing),
    Descend(&'a SchedulableItem),
    Continue,
}

/// Compute a timing for every item that has a due date.
///
/// Items without a due date are ignored entirely, as are `blocked_by`
/// references to them or to ids that are not present at all. When ids are
/// duplicated the first occurrence wins.
pub fn resolve_timings<'a>(items: &'a [SchedulableItem], offset: FixedOffset) -> Resolution<'a> {
    let mut order: Vec<&'a SchedulableItem> = Vec::new();
    let mut lookup: HashMap<&'a str, &'a SchedulableItem> = HashMap::new();

    for item in items.iter().filter(|i| i.is_schedulable()) {
        if lookup.contains_key(item.id.as_str()) {
            warn!(item = %item.id, "duplicate item id; keeping the first occurrence");
            continue;
        }
        lookup.insert(item.id.as_str(), item);
        order.push(item);
    }

    let cycles = DependencyGraph::from_items(items).cyclic_components();
    let mut cyclic = HashSet::new();
    for cycle in &cycles {
        warn!(
            cycle = ?cycle,
            "dependency cycle detected; using own dates for its members"
        );
        cyclic.extend(
            cycle
                .iter()
                .filter_map(|id| lookup.get_key_value(id.as_str()).map(|(k, _)| *k)),
        );
    }

    let mut walk = Walk {
        lookup,
        offset,
        cyclic,
        memo: HashMap::new(),
        on_stack: HashSet::new(),
    };

    for item in order {
        walk.resolve(item);
    }

    debug!(
        resolved = walk.memo.len(),
        cycles = cycles.len(),
        "resolved item timings"
    );

    Resolution {
        timings: walk.memo,
        cyclic: walk.cyclic,
        cycles,
    }
}

impl<'a> Walk<'a> {
    fn resolve(&mut self, root: &'a SchedulableItem) {
        let mut stack: Vec<Frame<'a>> = self.enter(root).into_iter().collect();

        while !stack.is_empty() {
            let step = match stack.last_mut() {
                Some(frame) => self.advance(frame),
                None => break,
            };

            match step {
                Step::Finished(id, timing) => {
                    stack.pop();
                    self.on_stack.remove(id);
                    self.memo.insert(id, timing);
                }
                Step::Descend(blocker) => stack.extend(self.enter(blocker)),
                Step::Continue => {}
            }
        }
    }

    /// Start resolving `item`: cycle members and already resolved items are
    /// settled on the spot, anything else gets a frame.
    fn enter(&mut self, item: &'a SchedulableItem) -> Option<Frame<'a>> {
        let id = item.id.as_str();
        if self.memo.contains_key(id) {
            return None;
        }

        let own = Timing::own_dates(item, self.offset).unwrap_or_else(|| {
            // Undated items never enter the lookup; treat them as having no
            // constraint.
            let ts = truncate_to_day(item.created_at, self.offset);
            Timing { start: ts, end: ts }
        });

        if self.cyclic.contains(id) {
            self.memo.insert(id, own);
            return None;
        }

        self.on_stack.insert(id);
        Some(Frame {
            item,
            next_blocker: 0,
            start: own.start,
            end: own.end,
        })
    }

    /// Look at the frame's next blocker.
    fn advance(&self, frame: &mut Frame<'a>) -> Step<'a> {
        let item = frame.item;
        let id = item.id.as_str();

        let Some(blocker_id) = item.blocked_by.get(frame.next_blocker) else {
            return Step::Finished(
                id,
                Timing {
                    start: frame.start,
                    end: frame.end,
                },
            );
        };

        let Some(blocker) = self.lookup.get(blocker_id.as_str()).copied() else {
            debug!(item = %id, blocker = %blocker_id, "blocker not schedulable; skipping");
            frame.next_blocker += 1;
            return Step::Continue;
        };

        let Some(blocker_timing) = self.memo.get(blocker_id.as_str()) else {
            if self.on_stack.contains(blocker_id.as_str()) {
                // Cycle members are settled before the walk starts.
                warn!(item = %id, blocker = %blocker_id, "unexpected cycle edge; skipping");
                frame.next_blocker += 1;
                return Step::Continue;
            }
            // Revisit this blocker once it is resolved.
            return Step::Descend(blocker);
        };

        let candidate = match item.lag_for(blocker_id) {
            Some(lag) => apply_lag(blocker_timing.end, lag),
            None => blocker_timing.end,
        };
        trace!(item = %id, blocker = %blocker_id, %candidate, "blocker candidate");
        frame.start = frame.start.max(candidate);
        frame.next_blocker += 1;
        Step::Continue
    }
}
