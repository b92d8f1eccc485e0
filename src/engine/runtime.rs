// src/engine/runtime.rs

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::snapshot::{parse_snapshot, SnapshotFormat};
use crate::watch::compute_content_hash;

use super::core::CoreRuntime;
use super::sink::ReportSink;
use super::{CoreCommand, RuntimeEvent};

/// Drives the core in response to `RuntimeEvent`s, performing the snapshot
/// reads it asks for and handing published schedules to a [`ReportSink`].
pub struct Runtime<S: ReportSink> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    fs: Arc<dyn FileSystem>,
    sink: S,
}

impl<S: ReportSink> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<S: ReportSink> Runtime<S> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        fs: Arc<dyn FileSystem>,
        sink: S,
    ) -> Self {
        Self {
            core,
            event_rx,
            fs,
            sink,
        }
    }

    /// Main event loop. Returns the sink once the loop stops, so callers
    /// (mostly tests) can inspect what was published.
    pub async fn run(mut self) -> Result<S> {
        info!("chorey-schedule runtime started");

        while let Some(event) = self.event_rx.recv().await {
            debug!(?event, "runtime received event");
            if !self.process(event)? {
                info!("core requested exit; stopping runtime");
                return Ok(self.sink);
            }
        }

        info!("runtime event channel closed; exiting");
        Ok(self.sink)
    }

    /// Feed one event (and any follow-ups it causes) through the core.
    ///
    /// Returns whether the loop should keep running.
    fn process(&mut self, event: RuntimeEvent) -> Result<bool> {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let step = self.core.step(event);

            for command in step.commands {
                match command {
                    CoreCommand::LoadSnapshot(path) => pending.push_back(self.load(&path)),
                    CoreCommand::Publish(report) => self.sink.publish(&report)?,
                    CoreCommand::ReportError(message) => self.sink.error(&message),
                }
            }

            if !step.keep_running {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Read, hash and parse the snapshot into a follow-up event.
    fn load(&self, path: &Path) -> RuntimeEvent {
        let loaded = SnapshotFormat::from_path(path).and_then(|format| {
            let bytes = self.fs.read(path)?;
            let hash = compute_content_hash(&bytes);
            let text = String::from_utf8(bytes).map_err(anyhow::Error::from)?;
            let items = parse_snapshot(&text, format)?;
            Ok((items, hash))
        });

        match loaded {
            Ok((items, hash)) => RuntimeEvent::SnapshotLoaded { items, hash },
            Err(e) => RuntimeEvent::SnapshotFailed {
                error: format!("{}: {e}", path.display()),
            },
        }
    }
}
