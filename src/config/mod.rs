// src/config/mod.rs

//! Settings loading and validation for chorey-schedule.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a settings file through the [`crate::fs`] abstraction (`loader.rs`).
//! - Validate values serde cannot check (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config};
pub use model::{ConfigFile, OutputSection, RawConfigFile, RawScheduleSection, WatchSection};
pub use validate::parse_utc_offset;
