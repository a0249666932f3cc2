// Mann-Whitney U rank-sum testing for campaign comparisons
//
// Campaign samples are tiny (typically five runs per configuration) and far
// from normal, so configurations are compared with the nonparametric
// Mann-Whitney U test:
// - exact permutation p-values for small tie-free samples, up to
//   n1 * n2 = EXACT_MAX_CELLS even when exact is forced
// - normal approximation with tie correction (and optional continuity
//   correction) otherwise
//
// Scientific Foundation:
// [1] Mann, H. B. & Whitney, D. R. (1947). On a test of whether one of two
//     random variables is stochastically larger than the other.
//     Annals of Mathematical Statistics 18(1).
// [2] Klees, G. et al. (2018). Evaluating fuzz testing. CCS. Recommends
//     the Mann-Whitney U test for comparing fuzzer campaigns.

mod config;
mod exact;
mod mann_whitney;
mod ranks;

pub use config::{Alternative, Method, RankSumConfig};
pub use exact::{UDistribution, EXACT_MAX_CELLS};
pub use mann_whitney::{mann_whitney_u, MannWhitneyResult};
pub use ranks::PooledRanks;

use thiserror::Error;

/// Errors for rank-sum comparisons
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankSumError {
    #[error("cannot rank empty samples (n1 = {n1}, n2 = {n2})")]
    EmptySample { n1: usize, n2: usize },

    #[error("samples contain NaN or infinite values")]
    NonFinite,

    #[error("all observations are tied; the rank-sum test is undefined")]
    Degenerate,

    #[error("normal distribution: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, RankSumError>;
