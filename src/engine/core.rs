// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! Consumes [`RuntimeEvent`]s and produces the commands the IO shell should
//! run next. It holds no channels and performs no IO, so it can be tested
//! without Tokio or a filesystem.

use tracing::{debug, info, warn};

use crate::engine::{CoreCommand, CoreStep, RuntimeEvent};
use crate::schedule::{build_schedule, ScheduleOptions};

#[derive(Debug)]
pub struct CoreRuntime {
    options: ScheduleOptions,
    /// Skip recomputation when the snapshot hash is unchanged.
    use_hash: bool,
    /// Hash of the snapshot behind the last published schedule.
    last_hash: Option<String>,
    published: u64,
}

impl CoreRuntime {
    pub fn new(options: ScheduleOptions, use_hash: bool) -> Self {
        Self {
            options,
            use_hash,
            last_hash: None,
            published: 0,
        }
    }

    /// Number of schedules published so far (for tests and logs).
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn last_hash(&self) -> Option<&str> {
        self.last_hash.as_deref()
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::SnapshotChanged { path } => {
                debug!(path = ?path, "snapshot change; requesting reload");
                running(vec![CoreCommand::LoadSnapshot(path)])
            }
            RuntimeEvent::SnapshotLoaded { items, hash } => {
                if self.use_hash && self.last_hash.as_deref() == Some(hash.as_str()) {
                    debug!(hash = %hash, "snapshot content unchanged; skipping rebuild");
                    return running(Vec::new());
                }

                let report = build_schedule(&items, &self.options);
                self.last_hash = Some(hash);
                self.published += 1;
                info!(
                    rows = report.rows.len(),
                    cycles = report.cycle_breaks().len(),
                    publish = self.published,
                    "schedule recomputed"
                );
                running(vec![CoreCommand::Publish(report)])
            }
            RuntimeEvent::SnapshotFailed { error } => {
                warn!(%error, "snapshot could not be loaded; keeping previous schedule");
                // Forget the hash so that restoring the previous content
                // publishes again.
                self.last_hash = None;
                running(vec![CoreCommand::ReportError(error)])
            }
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}

fn running(commands: Vec<CoreCommand>) -> CoreStep {
    CoreStep {
        commands,
        keep_running: true,
    }
}
