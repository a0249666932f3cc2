//! Experiment files: campaign reports and charts described in TOML
//!
//! ```toml
//! [[report]]
//! name = "ablation-bug"
//! precision = 2
//! mean_layout = "inline"   # inline | block
//!
//! [[report.sample]]
//! label = "bcfuzz_1"
//! values = [2, 5, 3, 3, 3]
//!
//! [[report.sample]]
//! label = "bcfuzz_gen"
//! values = [2, 3, 1, 2, 1]
//!
//! [[report.comparison]]
//! title = "bcfuzz_gen"
//! x = "bcfuzz_gen"
//! y = "bcfuzz_1"
//! alternative = "less"     # less | greater | two-sided
//! use_continuity = false
//! method = "auto"          # auto | exact | asymptotic
//!
//! [chart]
//! title = "Bar chart with error bars"
//! y_label = "Value"
//!
//! [[chart.bar]]
//! label = "A"
//! value = 10.0
//! error = 1.5
//! ```

use crate::chart::{ChartDataset, ChartError};
use crate::report::{Report, ReportError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading an experiment file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid experiment file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize experiment file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("invalid chart: {0}")]
    Chart(#[from] ChartError),

    #[error("experiment file defines neither reports nor a chart")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Contents of an experiment file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentFile {
    #[serde(default, rename = "report")]
    pub reports: Vec<Report>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartDataset>,
}

impl ExperimentFile {
    pub fn new(reports: Vec<Report>) -> Self {
        Self {
            reports,
            chart: None,
        }
    }

    /// Parse and validate an experiment file from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let file: ExperimentFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    /// Read, parse and validate an experiment file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            reports = file.reports.len(),
            chart = file.chart.is_some(),
            "loaded experiment file"
        );
        Ok(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reports.is_empty() && self.chart.is_none() {
            return Err(ConfigError::Empty);
        }
        for report in &self.reports {
            report.validate()?;
        }
        if let Some(chart) = &self.chart {
            chart.validate()?;
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
