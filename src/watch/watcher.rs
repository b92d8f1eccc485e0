// src/watch/watcher.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::RuntimeEvent;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// stops watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch the snapshot file and send `RuntimeEvent::SnapshotChanged` whenever
/// it is written, created or replaced.
///
/// The parent directory is watched rather than the file itself, since many
/// editors and exporters save by writing a new file and renaming it over the
/// old one.
pub fn spawn_watcher(
    snapshot: impl Into<PathBuf>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let snapshot = snapshot.into();
    let dir = watch_dir(&snapshot);
    let file_name = snapshot
        .file_name()
        .map(|n| n.to_os_string())
        .with_context(|| format!("snapshot path {:?} has no file name", snapshot))?;

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // No subscriber guarantees inside notify's thread.
                    eprintln!("chorey-schedule: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("chorey-schedule: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("watching {:?} for snapshot changes", snapshot);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if !touches_snapshot(&event, &file_name) {
                continue;
            }
            debug!(?event, "snapshot file event");
            let msg = RuntimeEvent::SnapshotChanged {
                path: snapshot.clone(),
            };
            if runtime_tx.send(msg).await.is_err() {
                debug!("runtime gone; stopping watcher loop");
                break;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Directory to watch for `snapshot`; a bare file name means the current one.
pub fn watch_dir(snapshot: &Path) -> PathBuf {
    match snapshot.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether a notify event concerns the snapshot file's contents.
pub fn touches_snapshot(event: &Event, file_name: &OsString) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some_and(|n| n == file_name.as_os_str()))
}
