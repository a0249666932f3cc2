// Configuration for the Mann-Whitney U rank-sum test
//
// Defaults reproduce the calls the campaign reports were written with:
// one-sided "less" alternative, no continuity correction, automatic choice
// between the exact and the normal-approximation p-value.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alternative hypothesis for the first sample relative to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// First sample is stochastically less than the second
    #[default]
    Less,
    /// First sample is stochastically greater than the second
    Greater,
    /// Distributions differ in either direction
    TwoSided,
}

impl Alternative {
    /// The direction that tests the same hypothesis with the samples swapped
    pub fn swapped(self) -> Self {
        match self {
            Alternative::Less => Alternative::Greater,
            Alternative::Greater => Alternative::Less,
            Alternative::TwoSided => Alternative::TwoSided,
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alternative::Less => "less",
            Alternative::Greater => "greater",
            Alternative::TwoSided => "two-sided",
        })
    }
}

/// How the p-value is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Exact for small tie-free samples, asymptotic otherwise
    #[default]
    Auto,
    /// Permutation distribution of U
    Exact,
    /// Normal approximation with tie correction
    Asymptotic,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Auto => "auto",
            Method::Exact => "exact",
            Method::Asymptotic => "asymptotic",
        })
    }
}

/// Configuration for a single rank-sum comparison
///
/// # Example
/// ```
/// use bcfuzz_eval::ranksum::{Alternative, RankSumConfig};
///
/// let config = RankSumConfig::default();
/// assert_eq!(config.alternative, Alternative::Less);
/// assert!(!config.use_continuity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankSumConfig {
    #[serde(default)]
    pub alternative: Alternative,

    /// Subtract 0.5 from |U - mu| in the normal approximation
    ///
    /// Ignored by the exact method.
    #[serde(default)]
    pub use_continuity: bool,

    #[serde(default)]
    pub method: Method,
}

impl RankSumConfig {
    /// Largest sample size (of the smaller sample) for which `Auto` picks
    /// the exact distribution
    pub const EXACT_THRESHOLD: usize = 8;

    pub fn new(alternative: Alternative) -> Self {
        Self {
            alternative,
            ..Self::default()
        }
    }

    pub fn with_continuity(mut self, use_continuity: bool) -> Self {
        self.use_continuity = use_continuity;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Resolve `Auto` into a concrete method for the given input shape
    pub fn resolve_method(&self, n1: usize, n2: usize, has_ties: bool) -> Method {
        match self.method {
            Method::Auto => {
                if !has_ties && n1.min(n2) <= Self::EXACT_THRESHOLD {
                    Method::Exact
                } else {
                    Method::Asymptotic
                }
            }
            other => other,
        }
    }
}
