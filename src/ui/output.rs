//! Output verbosity.

use std::str::FromStr;

use crate::config::OutputSetting;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including per-cookbook details.
    Verbose,
    /// Show status and results.
    #[default]
    Normal,
    /// Show results only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl From<OutputSetting> for OutputMode {
    fn from(setting: OutputSetting) -> Self {
        match setting {
            OutputSetting::Verbose => Self::Verbose,
            OutputSetting::Normal => Self::Normal,
            OutputSetting::Quiet => Self::Quiet,
            OutputSetting::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Check if this mode shows per-item details.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows headers and progress messages.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
