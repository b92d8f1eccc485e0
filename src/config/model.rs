// src/config/model.rs

use chrono::FixedOffset;
use serde::Deserialize;

use crate::schedule::ScheduleOptions;
use crate::types::OutputFormat;

/// Settings as read from a TOML file.
///
/// ```toml
/// [schedule]
/// utc_offset = "+02:00"
///
/// [output]
/// format = "table"
/// bar_width = 60
///
/// [watch]
/// use_hash = true
/// ```
///
/// Every section is optional. Convert into [`ConfigFile`] with `TryFrom`,
/// which validates values that serde cannot check on its own.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub schedule: RawScheduleSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// `[schedule]` section, before the offset string is parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScheduleSection {
    /// UTC offset (`"+02:00"`, `"-05:30"`) whose midnights delimit days.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_utc_offset() -> String {
    "+00:00".to_string()
}

impl Default for RawScheduleSection {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,

    /// Maximum number of columns used for bars in table output.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

fn default_bar_width() -> usize {
    60
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            bar_width: default_bar_width(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Skip recomputation when the snapshot's content hash is unchanged.
    #[serde(default = "default_use_hash")]
    pub use_hash: bool,
}

fn default_use_hash() -> bool {
    true
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            use_hash: default_use_hash(),
        }
    }
}

/// Validated settings.
///
/// Can only be obtained through `TryFrom<RawConfigFile>` (or
/// [`ConfigFile::default`]), so holders may rely on the values being sane.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub schedule: ScheduleOptions,
    pub output: OutputSection,
    pub watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        day_offset: FixedOffset,
        output: OutputSection,
        watch: WatchSection,
    ) -> Self {
        Self {
            schedule: ScheduleOptions { day_offset },
            output,
            watch,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            schedule: ScheduleOptions::default(),
            output: OutputSection::default(),
            watch: WatchSection::default(),
        }
    }
}
