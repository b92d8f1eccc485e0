// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The schedule builder itself never fails; these errors come from loading
//! configuration and task snapshots.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChoreyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ChoreyError>;
