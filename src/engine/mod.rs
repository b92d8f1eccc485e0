// src/engine/mod.rs

//! Recompute-on-change engine for `--watch`.
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`]; where published schedules go is abstracted
//! by [`sink`].

use std::path::PathBuf;

use crate::schedule::{SchedulableItem, ScheduleReport};

/// Events flowing into the runtime from the watcher, the loader and Ctrl-C.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// The snapshot file may have changed and should be re-read.
    SnapshotChanged { path: PathBuf },
    /// The snapshot was read and parsed.
    SnapshotLoaded {
        items: Vec<SchedulableItem>,
        /// Content hash of the bytes the items were parsed from.
        hash: String,
    },
    /// Reading or parsing the snapshot failed.
    SnapshotFailed { error: String },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreCommand {
    /// Read and parse the snapshot at this path, then feed the result back.
    LoadSnapshot(PathBuf),
    /// Show this freshly computed schedule.
    Publish(ScheduleReport),
    /// Tell the user the snapshot could not be used; keep the last chart.
    ReportError(String),
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

pub mod core;
pub mod runtime;
pub mod sink;

pub use core::CoreRuntime;
pub use runtime::Runtime;
pub use sink::{ReportSink, StdoutSink};
