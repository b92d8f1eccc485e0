// src/engine/sink.rs

use std::io::Write;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::render::render;
use crate::schedule::ScheduleReport;
use crate::types::OutputFormat;

/// Where the runtime sends published schedules and load errors.
pub trait ReportSink: Send {
    fn publish(&mut self, report: &ScheduleReport) -> Result<()>;
    fn error(&mut self, message: &str);
}

/// Production sink: renders to stdout, errors to stderr.
#[derive(Debug)]
pub struct StdoutSink {
    format: OutputFormat,
    config: ConfigFile,
}

impl StdoutSink {
    pub fn new(format: OutputFormat, config: ConfigFile) -> Self {
        Self { format, config }
    }
}

impl ReportSink for StdoutSink {
    fn publish(&mut self, report: &ScheduleReport) -> Result<()> {
        let text = render(report, self.format, &self.config)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn error(&mut self, message: &str) {
        eprintln!("chorey-schedule: {message}");
    }
}
