// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod render;
pub mod schedule;
pub mod snapshot;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{resolve_config, ConfigFile};
use crate::dag::check_dependencies;
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, StdoutSink};
use crate::fs::{FileSystem, RealFileSystem};
use crate::render::render;
use crate::schedule::build_schedule;
use crate::snapshot::load_snapshot;
use crate::types::OutputFormat;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading
/// - snapshot loading
/// - one of: dependency check, one-shot schedule, or watch mode
/// - Ctrl-C handling (watch mode)
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let cfg = resolve_config(fs.as_ref(), args.config.as_deref().map(Path::new))?;
    let format = args.format.unwrap_or(cfg.output.format);
    let snapshot = PathBuf::from(&args.snapshot);

    debug!(?cfg, ?format, snapshot = ?snapshot, "resolved settings");

    if args.check {
        return run_check(fs.as_ref(), &snapshot);
    }

    if !args.watch {
        let items = load_snapshot(fs.as_ref(), &snapshot)?;
        let report = build_schedule(&items, &cfg.schedule);
        print!("{}", render(&report, format, &cfg)?);
        return Ok(());
    }

    run_watch(fs, snapshot, format, cfg).await
}

/// `--check`: report cycles and dangling blockers; cycles fail the run.
fn run_check(fs: &dyn FileSystem, snapshot: &Path) -> Result<()> {
    let items = load_snapshot(fs, snapshot)?;
    let report = check_dependencies(&items);
    println!("{report}");

    if report.has_cycles() {
        bail!(
            "{} dependency cycle(s) found in {:?}",
            report.cycles.len(),
            snapshot
        );
    }
    Ok(())
}

/// `--watch`: print the schedule now and again after every snapshot change.
async fn run_watch(
    fs: Arc<dyn FileSystem>,
    snapshot: PathBuf,
    format: OutputFormat,
    cfg: ConfigFile,
) -> Result<()> {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Resolve symlinks so the watched directory is the one actually written.
    let watched = fs.canonicalize(&snapshot).unwrap_or_else(|e| {
        debug!("cannot canonicalize {:?} ({e}); watching as given", snapshot);
        snapshot.clone()
    });
    let _watcher_handle = crate::watch::spawn_watcher(watched, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // Initial computation before any change arrives.
    rt_tx
        .send(RuntimeEvent::SnapshotChanged {
            path: snapshot.clone(),
        })
        .await?;
    info!(snapshot = ?snapshot, "watch mode started");

    let core = CoreRuntime::new(cfg.schedule, cfg.watch.use_hash);
    let sink = StdoutSink::new(format, cfg);
    let runtime = Runtime::new(core, rt_rx, fs, sink);
    runtime.run().await?;
    Ok(())
}
