use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::SeriesError;

/// Sample file used when neither the command line nor the config names one.
pub const DEFAULT_INPUT: &str = "Data/play.txt";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Columns per line; one channel per column.
    pub channels: usize,
    /// Seconds between consecutive samples.
    pub time_period: f64,
    /// Samples spanned by each finite-difference rate.
    pub rate_window: usize,
    /// Sample file; `None` means [`DEFAULT_INPUT`].
    pub input: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        // Four sensors logged every 30 seconds.
        Self {
            channels: 4,
            time_period: 30.0,
            rate_window: 1,
            input: None,
        }
    }
}

impl AnalysisConfig {
    /// Reads a JSON config; missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.channels == 0 {
            return Err(SeriesError::InvalidParameter(
                "channel count must be at least one",
            ));
        }
        if !(self.time_period.is_finite() && self.time_period > 0.0) {
            return Err(SeriesError::InvalidParameter(
                "time period must be a positive, finite number",
            ));
        }
        if self.rate_window == 0 {
            return Err(SeriesError::InvalidParameter(
                "rate window must be at least one sample",
            ));
        }
        Ok(())
    }
}
