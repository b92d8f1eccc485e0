// src/config/validate.rs

use chrono::FixedOffset;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ChoreyError, Result};

/// Narrowest table chart that still leaves room for a visible bar.
pub const MIN_BAR_WIDTH: usize = 10;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ChoreyError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let day_offset = parse_utc_offset(&raw.schedule.utc_offset)?;
        validate_output(&raw)?;
        Ok(ConfigFile::new_unchecked(day_offset, raw.output, raw.watch))
    }
}

/// Parse `"+HH:MM"` / `"-HH:MM"` (also `"Z"` and `"UTC"`) into an offset.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let trimmed = s.trim();
    let normalized = match trimmed {
        "Z" | "z" | "UTC" | "utc" => "+00:00",
        other => other,
    };

    normalized.parse::<FixedOffset>().map_err(|e| {
        ChoreyError::ConfigError(format!(
            "[schedule].utc_offset must look like \"+02:00\" (got {trimmed:?}): {e}"
        ))
    })
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    if cfg.output.bar_width < MIN_BAR_WIDTH {
        return Err(ChoreyError::ConfigError(format!(
            "[output].bar_width must be >= {MIN_BAR_WIDTH} (got {})",
            cfg.output.bar_width
        )));
    }
    Ok(())
}
