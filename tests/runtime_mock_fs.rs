use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chorey_schedule::engine::{CoreRuntime, ReportSink, Runtime, RuntimeEvent};
use chorey_schedule::errors::Result;
use chorey_schedule::fs::{FileSystem, MockFileSystem};
use chorey_schedule::schedule::{ScheduleOptions, ScheduleReport};
use chorey_schedule_test_utils::init_tracing;
use tokio::sync::mpsc;

/// Sink that records everything the runtime hands it.
#[derive(Clone, Default)]
struct RecordingSink {
    reports: Arc<Mutex<Vec<ScheduleReport>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

impl ReportSink for RecordingSink {
    fn publish(&mut self, report: &ScheduleReport) -> Result<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    fn error(&mut self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

const BOARD_V1: &str = r#"
[task.a]
created_at = "2024-01-01"
due_date = "2024-01-05"

[task.b]
created_at = "2024-01-02"
due_date = "2024-01-10"
blocked_by = ["a"]
"#;

const BOARD_V2: &str = r#"
[task.a]
created_at = "2024-01-01"
due_date = "2024-01-08"

[task.b]
created_at = "2024-01-02"
due_date = "2024-01-10"
blocked_by = ["a"]
"#;

async fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {what}"));
}

fn spawn_runtime(
    fs: &MockFileSystem,
    sink: RecordingSink,
) -> (
    mpsc::Sender<RuntimeEvent>,
    tokio::task::JoinHandle<Result<RecordingSink>>,
) {
    let (tx, rx) = mpsc::channel(16);
    let fs: Arc<dyn FileSystem> = Arc::new(fs.clone());
    let core = CoreRuntime::new(ScheduleOptions::default(), true);
    let runtime = Runtime::new(core, rx, fs, sink);
    (tx, tokio::spawn(runtime.run()))
}

#[tokio::test]
async fn test_runtime_recomputes_on_real_changes_only() {
    init_tracing();

    let path = PathBuf::from("board.toml");
    let fs = MockFileSystem::new();
    fs.add_file(&path, BOARD_V1);

    let sink = RecordingSink::default();
    let (tx, handle) = spawn_runtime(&fs, sink.clone());

    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("first publish", || sink.report_count() == 1).await;

    // Same bytes again: nothing new to show.
    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();

    fs.add_file(&path, BOARD_V2);
    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("second publish", || sink.report_count() == 2).await;

    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();
    let sink = handle.await.unwrap().unwrap();

    let reports = sink.reports.lock().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].row("b").unwrap().start_offset_days, 4);
    assert_eq!(reports[1].row("b").unwrap().start_offset_days, 7);
    assert_eq!(sink.error_count(), 0);
}

#[tokio::test]
async fn test_runtime_survives_broken_snapshot() {
    init_tracing();

    let path = PathBuf::from("board.toml");
    let fs = MockFileSystem::new();
    fs.add_file(&path, "[task.a]\ncreated_at = \"not a date\"\n");

    let sink = RecordingSink::default();
    let (tx, handle) = spawn_runtime(&fs, sink.clone());

    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("load error", || sink.error_count() == 1).await;
    assert_eq!(sink.report_count(), 0);

    fs.add_file(&path, BOARD_V1);
    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("publish after fix", || sink.report_count() == 1).await;

    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();
    let sink = handle.await.unwrap().unwrap();

    let errors = sink.errors.lock().unwrap();
    assert!(errors[0].contains("board.toml"));
    assert!(errors[0].contains("created_at"));
}

#[tokio::test]
async fn test_runtime_reports_missing_file() {
    init_tracing();

    let fs = MockFileSystem::new();
    let sink = RecordingSink::default();
    let (tx, handle) = spawn_runtime(&fs, sink.clone());

    tx.send(RuntimeEvent::SnapshotChanged {
        path: PathBuf::from("gone.json"),
    })
    .await
    .unwrap();
    wait_until("missing file error", || sink.error_count() == 1).await;

    drop(tx);
    let sink = handle.await.unwrap().unwrap();
    assert_eq!(sink.report_count(), 0);
}

#[tokio::test]
async fn test_runtime_republishes_after_snapshot_reappears() {
    init_tracing();

    let path = PathBuf::from("board.toml");
    let fs = MockFileSystem::new();
    fs.add_file(&path, BOARD_V1);

    let sink = RecordingSink::default();
    let (tx, handle) = spawn_runtime(&fs, sink.clone());

    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("first publish", || sink.report_count() == 1).await;

    fs.remove_file(&path);
    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("missing file error", || sink.error_count() == 1).await;

    // The failure forgets the last hash, so identical bytes publish again.
    fs.add_file(&path, BOARD_V1);
    tx.send(RuntimeEvent::SnapshotChanged { path: path.clone() })
        .await
        .unwrap();
    wait_until("republish", || sink.report_count() == 2).await;

    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();
    handle.await.unwrap().unwrap();
}
