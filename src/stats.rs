//! Descriptive statistics for campaign samples
//!
//! Means are what the reports print; the extended figures (median, spread)
//! are carried along for JSON/CSV output and `--debug` logging.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while summarizing a sample
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("sample '{0}' is empty")]
    EmptySample(String),

    #[error("sample '{label}' contains a non-finite value at index {index}")]
    NonFinite { label: String, index: usize },
}

pub type Result<T> = std::result::Result<T, StatsError>;

/// A named, immutable measurement sample (one value per campaign run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub label: String,
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(label: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            label: label.into(),
            values: values.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the sample can be summarized: non-empty and all values finite
    pub fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(StatsError::EmptySample(self.label.clone()));
        }
        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(StatsError::NonFinite {
                label: self.label.clone(),
                index,
            });
        }
        Ok(())
    }

    /// Arithmetic mean (`sum / count`)
    pub fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Mean rounded to `precision` decimal digits
    pub fn rounded_mean(&self, precision: u32) -> Result<Rounded> {
        Ok(Rounded::new(self.mean()?, precision))
    }

    pub fn summary(&self) -> Result<SampleSummary> {
        SampleSummary::from_sample(self)
    }
}

/// Extended statistics for a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for a single value
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl SampleSummary {
    pub fn from_sample(sample: &Sample) -> Result<Self> {
        let mean = sample.mean()?;
        let count = sample.len();

        let stddev = if count > 1 {
            let ss: f64 = sample.values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        let mut sorted = sample.values.clone();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            count,
            mean,
            stddev,
            min: sorted[0],
            max: sorted[count - 1],
            median: percentile(&sorted, 50.0),
        })
    }
}

/// Linear-interpolated percentile from sorted data
pub fn percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Most decimal digits a [`Rounded`] keeps; an `f64` carries no more
pub const MAX_PRECISION: u32 = 17;

/// A value rounded to a fixed number of decimal digits
///
/// Rounding works on the exact binary value, so `2.675` (stored as
/// 2.67499...) rounds to `2.67`. Display uses the
/// shortest form with at least one fractional digit: `3.2`, `591.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rounded {
    pub value: f64,
    pub precision: u32,
}

impl Rounded {
    /// Round `raw`; `precision` is capped at [`MAX_PRECISION`]
    pub fn new(raw: f64, precision: u32) -> Self {
        let precision = precision.min(MAX_PRECISION);
        let formatted = format!("{:.*}", precision as usize, raw);
        // Parsing our own fixed-point output cannot fail
        let value = formatted.parse::<f64>().unwrap_or(raw);
        Self { value, precision }
    }
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the trailing ".0" on integral values
        write!(f, "{:?}", self.value)
    }
}
