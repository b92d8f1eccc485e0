// src/dag/mod.rs

//! Blocker graph analysis.
//!
//! - [`graph`] holds the directed blocker graph of a snapshot (petgraph).
//! - [`check`] turns it into the report printed by `--check`.

pub mod check;
pub mod graph;

pub use check::{check_dependencies, DependencyReport};
pub use graph::DependencyGraph;
