// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Default settings file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "Chorey.toml";

/// Load a settings file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// a checked [`ConfigFile`].
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(fs, &path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the settings for a run.
///
/// - An explicit path must exist and be valid.
/// - Without one, `Chorey.toml` is used if present; otherwise defaults apply.
pub fn resolve_config(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_and_validate(fs, path),
        None => {
            let path = default_config_path();
            if fs.is_file(&path) {
                load_and_validate(fs, &path)
            } else {
                debug!(path = ?path, "no settings file found; using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
