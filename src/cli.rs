// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::OutputFormat;

/// Command-line arguments for `chorey-schedule`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chorey-schedule",
    version,
    about = "Compute a dependency-aware Gantt schedule from a Chorey task snapshot.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task snapshot (`.toml` or `.json`).
    #[arg(long, value_name = "PATH")]
    pub snapshot: String,

    /// Path to the settings file (TOML).
    ///
    /// Default: `Chorey.toml` in the current working directory. A missing
    /// default file is not an error; built-in defaults are used instead.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Output format; overrides `[output].format` from the settings file.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Keep running and recompute whenever the snapshot file changes.
    #[arg(long)]
    pub watch: bool,

    /// Only analyse the dependency graph (cycles, dangling blockers).
    ///
    /// Exits with a non-zero status when cycles are found.
    #[arg(long, conflicts_with = "watch")]
    pub check: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHOREY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
