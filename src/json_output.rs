//! JSON output format for report outcomes
//!
//! `--format json` emits one document per invocation holding every report
//! that ran, with the extended sample statistics included.

use crate::report::{Report, ReportOutcome};
use serde::{Deserialize, Serialize};

/// Name and description of a report (for `list`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReportInfo {
    pub name: String,
    pub description: String,
    /// Number of samples in the report
    pub samples: usize,
    /// Number of rank-sum comparisons in the report
    pub comparisons: usize,
}

impl From<&Report> for JsonReportInfo {
    fn from(report: &Report) -> Self {
        Self {
            name: report.name.clone(),
            description: report.description.clone(),
            samples: report.samples.len(),
            comparisons: report.comparisons.len(),
        }
    }
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Crate version that produced the document
    pub version: String,
    /// Format name
    pub format: String,
    /// Evaluated reports, in run order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<ReportOutcome>,
    /// Available reports (only filled by `list`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<JsonReportInfo>,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "bcfuzz-eval-json-v1".to_string(),
            reports: Vec::new(),
            catalog: Vec::new(),
        }
    }

    pub fn add_report(&mut self, outcome: ReportOutcome) {
        self.reports.push(outcome);
    }

    pub fn add_catalog_entry(&mut self, report: &Report) {
        self.catalog.push(JsonReportInfo::from(report));
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}
