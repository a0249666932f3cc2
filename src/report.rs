//! Campaign reports: per-sample means followed by pairwise rank-sum tests
//!
//! A [`Report`] is the unit the CLI runs. Evaluating it produces a
//! [`ReportOutcome`] that the output formatters turn into text, JSON or CSV.

use crate::ranksum::{mann_whitney_u, MannWhitneyResult, RankSumConfig, RankSumError};
use crate::stats::{Rounded, Sample, SampleSummary, StatsError, MAX_PRECISION};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Separator printed between the means and the tests
pub const PVALUE_SEPARATOR: &str = "=============p-value==============";

/// Errors raised while validating or evaluating a report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("report '{report}': precision {precision} exceeds {max} digits")]
    Precision {
        report: String,
        precision: u32,
        max: u32,
    },

    #[error("report '{report}': duplicate sample label '{label}'")]
    DuplicateLabel { report: String, label: String },

    #[error("report '{report}': comparison '{comparison}' references unknown sample '{label}'")]
    UnknownSample {
        report: String,
        comparison: String,
        label: String,
    },

    #[error("report '{report}': {source}")]
    Stats {
        report: String,
        #[source]
        source: StatsError,
    },

    #[error("report '{report}', comparison '{comparison}': {source}")]
    RankSum {
        report: String,
        comparison: String,
        #[source]
        source: RankSumError,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// A pairwise test between two samples of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Heading printed above the result
    pub title: String,
    /// Label of the first sample
    pub x: String,
    /// Label of the second sample
    pub y: String,
    #[serde(flatten)]
    pub config: RankSumConfig,
}

impl Comparison {
    /// One-sided `less` comparison without continuity correction
    pub fn less(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x: x.into(),
            y: y.into(),
            config: RankSumConfig::default(),
        }
    }
}

/// How the per-sample means are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeanLayout {
    /// `label :  mean` on one line
    #[default]
    Inline,
    /// `label:`, the mean on the next line, then a blank line
    Block,
}

impl MeanLayout {
    fn is_inline(&self) -> bool {
        *self == MeanLayout::Inline
    }
}

fn default_precision() -> u32 {
    2
}

fn default_separator() -> bool {
    true
}

/// A named set of samples and the comparisons run between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal digits kept when printing means
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Print [`PVALUE_SEPARATOR`] before the comparisons
    #[serde(default = "default_separator")]
    pub separator: bool,
    #[serde(default, skip_serializing_if = "MeanLayout::is_inline")]
    pub mean_layout: MeanLayout,
    #[serde(default, rename = "sample")]
    pub samples: Vec<Sample>,
    #[serde(default, rename = "comparison")]
    pub comparisons: Vec<Comparison>,
}

impl Report {
    pub fn new(name: impl Into<String>, description: impl Into<String>, precision: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            precision,
            separator: true,
            mean_layout: MeanLayout::Inline,
            samples: Vec::new(),
            comparisons: Vec::new(),
        }
    }

    pub fn without_separator(mut self) -> Self {
        self.separator = false;
        self
    }

    pub fn with_mean_layout(mut self, mean_layout: MeanLayout) -> Self {
        self.mean_layout = mean_layout;
        self
    }

    pub fn sample(mut self, label: &str, values: &[f64]) -> Self {
        self.samples.push(Sample::new(label, values));
        self
    }

    /// Add a one-sided `less` comparison of sample `x` against sample `y`
    pub fn compare(mut self, title: &str, x: &str, y: &str) -> Self {
        self.comparisons.push(Comparison::less(title, x, y));
        self
    }

    pub fn find_sample(&self, label: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.label == label)
    }

    /// Check the precision is representable, labels are unique, samples are
    /// usable and every comparison refers to an existing sample
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(ReportError::Precision {
                report: self.name.clone(),
                precision: self.precision,
                max: MAX_PRECISION,
            });
        }

        let mut seen = HashSet::new();
        for sample in &self.samples {
            if !seen.insert(sample.label.as_str()) {
                return Err(ReportError::DuplicateLabel {
                    report: self.name.clone(),
                    label: sample.label.clone(),
                });
            }
            sample.validate().map_err(|source| ReportError::Stats {
                report: self.name.clone(),
                source,
            })?;
        }

        for comparison in &self.comparisons {
            for label in [&comparison.x, &comparison.y] {
                if !seen.contains(label.as_str()) {
                    return Err(ReportError::UnknownSample {
                        report: self.name.clone(),
                        comparison: comparison.title.clone(),
                        label: label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Compute all means and run all comparisons
    pub fn evaluate(&self) -> Result<ReportOutcome> {
        self.validate()?;
        debug!(
            report = %self.name,
            samples = self.samples.len(),
            comparisons = self.comparisons.len(),
            "evaluating report"
        );

        let means = self
            .samples
            .iter()
            .map(|sample| {
                let summary = sample.summary().map_err(|source| ReportError::Stats {
                    report: self.name.clone(),
                    source,
                })?;
                debug!(
                    label = %sample.label,
                    mean = summary.mean,
                    median = summary.median,
                    stddev = summary.stddev,
                    "sample summary"
                );
                Ok(MeanLine {
                    label: sample.label.clone(),
                    mean: Rounded::new(summary.mean, self.precision),
                    summary,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let tests = self
            .comparisons
            .iter()
            .map(|comparison| self.run_comparison(comparison))
            .collect::<Result<Vec<_>>>()?;

        Ok(ReportOutcome {
            name: self.name.clone(),
            separator: self.separator,
            mean_layout: self.mean_layout,
            means,
            tests,
        })
    }

    fn run_comparison(&self, comparison: &Comparison) -> Result<TestLine> {
        // validate() guarantees both labels resolve
        let lookup = |label: &str| {
            self.find_sample(label)
                .ok_or_else(|| ReportError::UnknownSample {
                    report: self.name.clone(),
                    comparison: comparison.title.clone(),
                    label: label.to_string(),
                })
        };
        let x = lookup(&comparison.x)?;
        let y = lookup(&comparison.y)?;

        let result = mann_whitney_u(&x.values, &y.values, &comparison.config).map_err(
            |source| ReportError::RankSum {
                report: self.name.clone(),
                comparison: comparison.title.clone(),
                source,
            },
        )?;

        Ok(TestLine {
            title: comparison.title.clone(),
            x: comparison.x.clone(),
            y: comparison.y.clone(),
            result,
        })
    }
}

/// Rounded mean of one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanLine {
    pub label: String,
    pub mean: Rounded,
    pub summary: SampleSummary,
}

/// Outcome of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestLine {
    pub title: String,
    pub x: String,
    pub y: String,
    pub result: MannWhitneyResult,
}

/// Everything a report computed, in print order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub name: String,
    pub separator: bool,
    pub mean_layout: MeanLayout,
    pub means: Vec<MeanLine>,
    pub tests: Vec<TestLine>,
}

impl ReportOutcome {
    /// Console layout:
    ///
    /// ```text
    /// bcfuzz_1 :  3.2
    /// =============p-value==============
    /// bcfuzz_gen:
    /// MannwhitneyuResult(statistic=3.5, pvalue=0.0243161522573452)
    ///
    /// ```
    ///
    /// With [`MeanLayout::Block`] each mean is printed as `label:`, the
    /// value, and a blank line.
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        for line in &self.means {
            match self.mean_layout {
                MeanLayout::Inline => {
                    report.push_str(&format!("{} :  {}\n", line.label, line.mean))
                }
                MeanLayout::Block => {
                    report.push_str(&format!("{}:\n{}\n\n", line.label, line.mean))
                }
            }
        }

        if self.separator {
            report.push_str(PVALUE_SEPARATOR);
            report.push('\n');
        }

        for test in &self.tests {
            report.push_str(&format!("{}:\n", test.title));
            report.push_str(&format!("{}\n\n", test.result));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranksum::{Alternative, Method};

    fn ablation() -> Report {
        Report::new("ablation-bug", "", 2)
            .sample("bcfuzz_1", &[2.0, 5.0, 3.0, 3.0, 3.0])
            .sample("bcfuzz_gen", &[2.0, 3.0, 1.0, 2.0, 1.0])
            .compare("bcfuzz_gen", "bcfuzz_gen", "bcfuzz_1")
    }

    #[test]
    fn test_report_string_layout() {
        let outcome = Report::new("separated", "", 2)
            .sample("baseline", &[1.0, 2.0, 3.0])
            .sample("treatment", &[4.0, 5.0, 6.0])
            .compare("baseline", "baseline", "treatment")
            .evaluate()
            .unwrap();
        assert_eq!(
            outcome.to_report_string(),
            "baseline :  2.0\n\
             treatment :  5.0\n\
             =============p-value==============\n\
             baseline:\n\
             MannwhitneyuResult(statistic=0.0, pvalue=0.05)\n\n"
        );
    }

    #[test]
    fn test_report_string_ablation_lines() {
        let text = ablation().evaluate().unwrap().to_report_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "bcfuzz_1 :  3.2");
        assert_eq!(lines[1], "bcfuzz_gen :  1.8");
        assert_eq!(lines[2], PVALUE_SEPARATOR);
        assert_eq!(lines[3], "bcfuzz_gen:");
        assert!(lines[4].starts_with("MannwhitneyuResult(statistic=3.5, pvalue=0.02431615225"));
        assert_eq!(lines[5], "");
    }

    #[test]
    fn test_report_without_separator() {
        let outcome = ablation().without_separator().evaluate().unwrap();
        assert!(!outcome.to_report_string().contains(PVALUE_SEPARATOR));
    }

    #[test]
    fn test_report_string_block_means() {
        let outcome = ablation()
            .with_mean_layout(MeanLayout::Block)
            .evaluate()
            .unwrap();
        assert!(outcome.to_report_string().starts_with(
            "bcfuzz_1:\n3.2\n\n\
             bcfuzz_gen:\n1.8\n\n\
             =============p-value==============\n\
             bcfuzz_gen:\nMannwhitneyuResult("
        ));
    }

    #[test]
    fn test_precision_beyond_f64_rejected() {
        let mut report = ablation();
        report.precision = 4_000_000_000;

        let err = report.evaluate().unwrap_err();
        assert_eq!(
            err,
            ReportError::Precision {
                report: "ablation-bug".to_string(),
                precision: 4_000_000_000,
                max: MAX_PRECISION,
            }
        );
        assert!(err.to_string().contains("4000000000"));

        report.precision = MAX_PRECISION;
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_evaluate_keeps_order() {
        let outcome = ablation().evaluate().unwrap();
        let labels: Vec<_> = outcome.means.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["bcfuzz_1", "bcfuzz_gen"]);
        assert_eq!(outcome.tests.len(), 1);
        assert_eq!(outcome.tests[0].result.method, Method::Asymptotic);
        assert_eq!(outcome.tests[0].result.alternative, Alternative::Less);
    }

    #[test]
    fn test_unknown_sample_rejected() {
        let report = ablation().compare("bcfuzz_mutate", "bcfuzz_mutate", "bcfuzz_2");
        assert!(matches!(
            report.evaluate(),
            Err(ReportError::UnknownSample { label, .. }) if label == "bcfuzz_mutate"
        ));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let report = ablation().sample("bcfuzz_1", &[1.0]);
        assert!(matches!(
            report.validate(),
            Err(ReportError::DuplicateLabel { label, .. }) if label == "bcfuzz_1"
        ));
    }

    #[test]
    fn test_empty_sample_rejected() {
        let report = ablation().sample("empty", &[]);
        assert!(matches!(
            report.validate(),
            Err(ReportError::Stats {
                source: StatsError::EmptySample(_),
                ..
            })
        ));
    }

    #[test]
    fn test_degenerate_comparison_reported() {
        let report = Report::new("flat", "", 1)
            .sample("a", &[1.0, 1.0])
            .sample("b", &[1.0, 1.0])
            .compare("a_vs_b", "a", "b");

        let err = report.evaluate().unwrap_err();
        assert!(matches!(
            err,
            ReportError::RankSum {
                source: RankSumError::Degenerate,
                ..
            }
        ));
        assert!(err.to_string().contains("a_vs_b"));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let a = ablation().evaluate().unwrap().to_report_string();
        let b = ablation().evaluate().unwrap().to_report_string();
        assert_eq!(a, b);
    }
}
