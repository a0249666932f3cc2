// Mann-Whitney U rank-sum test
//
// The reported statistic is U1, the U of the first sample:
//     U1 = R1 - n1 (n1 + 1) / 2
// where R1 is the sum of the first sample's midranks in the pooled data.
// The tail that is integrated depends on the alternative:
//     greater   -> P(U >= U1)
//     less      -> P(U >= U2),  U2 = n1 n2 - U1   (same as P(U <= U1))
//     two-sided -> 2 P(U >= max(U1, U2))

use crate::ranksum::config::{Alternative, Method, RankSumConfig};
use crate::ranksum::exact::UDistribution;
use crate::ranksum::ranks::PooledRanks;
use crate::ranksum::{RankSumError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;
use tracing::{debug, trace};

/// Result of a Mann-Whitney U test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannWhitneyResult {
    /// U statistic of the first sample
    pub statistic: f64,

    /// p-value for the configured alternative, in `[0, 1]`
    pub pvalue: f64,

    /// Method actually used (never `Auto`)
    pub method: Method,

    pub alternative: Alternative,
}

impl fmt::Display for MannWhitneyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MannwhitneyuResult(statistic={:?}, pvalue={:?})",
            self.statistic, self.pvalue
        )
    }
}

fn check_input(x: &[f64], y: &[f64]) -> Result<()> {
    if x.is_empty() || y.is_empty() {
        return Err(RankSumError::EmptySample {
            n1: x.len(),
            n2: y.len(),
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(RankSumError::NonFinite);
    }
    Ok(())
}

/// Compare two independent samples with the Mann-Whitney U test
///
/// # Arguments
/// * `x` - First sample (the one the alternative talks about)
/// * `y` - Second sample
/// * `config` - Alternative, continuity correction and p-value method
///
/// # Example
/// ```
/// use bcfuzz_eval::ranksum::{mann_whitney_u, RankSumConfig};
///
/// let baseline = [1.0, 2.0, 3.0];
/// let treatment = [4.0, 5.0, 6.0];
///
/// let result = mann_whitney_u(&baseline, &treatment, &RankSumConfig::default()).unwrap();
/// assert_eq!(result.statistic, 0.0);
/// assert!((result.pvalue - 0.05).abs() < 1e-12);
/// ```
pub fn mann_whitney_u(x: &[f64], y: &[f64], config: &RankSumConfig) -> Result<MannWhitneyResult> {
    check_input(x, y)?;

    let n1 = x.len();
    let n2 = y.len();
    let ranks = PooledRanks::new(x, y);
    if ranks.all_tied() {
        return Err(RankSumError::Degenerate);
    }

    let n1n2 = n1 as f64 * n2 as f64;
    let u1 = ranks.rank_sum(n1) - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = n1n2 - u1;

    let u = match config.alternative {
        Alternative::Greater => u1,
        Alternative::Less => u2,
        Alternative::TwoSided => u1.max(u2),
    };

    let method = config.resolve_method(n1, n2, ranks.has_ties());
    let exact = match method {
        Method::Exact => {
            let dist = UDistribution::try_new(n1, n2);
            if dist.is_none() {
                debug!(n1, n2, "exact distribution too large, using normal approximation");
            }
            dist
        }
        _ => None,
    };
    let (method, mut pvalue) = match exact {
        Some(dist) => (Method::Exact, dist.sf(u)),
        None => (
            Method::Asymptotic,
            asymptotic_sf(u, n1, n2, &ranks, config.use_continuity)?,
        ),
    };

    if config.alternative == Alternative::TwoSided {
        pvalue *= 2.0;
    }
    let pvalue = pvalue.clamp(0.0, 1.0);

    trace!(
        n1,
        n2,
        u1,
        u,
        %method,
        alternative = %config.alternative,
        pvalue,
        "mann-whitney u"
    );

    Ok(MannWhitneyResult {
        statistic: u1,
        pvalue,
        method,
        alternative: config.alternative,
    })
}

/// Normal-approximation upper tail `P(U >= u)` with tie correction
fn asymptotic_sf(
    u: f64,
    n1: usize,
    n2: usize,
    ranks: &PooledRanks,
    use_continuity: bool,
) -> Result<f64> {
    let n = n1 as f64 + n2 as f64;
    let n1n2 = n1 as f64 * n2 as f64;
    let mu = n1n2 / 2.0;

    let variance = n1n2 / 12.0 * ((n + 1.0) - ranks.tie_term() / (n * (n - 1.0)));
    if variance <= 0.0 || !variance.is_finite() {
        return Err(RankSumError::Degenerate);
    }

    let mut z = u - mu;
    if use_continuity {
        z -= 0.5;
    }
    z /= variance.sqrt();

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| RankSumError::Distribution(e.to_string()))?;
    Ok(normal.sf(z))
}
