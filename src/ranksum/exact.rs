// Exact null distribution of the Mann-Whitney U statistic
//
// Under H0 every assignment of the pooled ranks to the two samples is
// equally likely. The number of assignments with U = k for sizes (m, n) is
// the k-th coefficient of the Gaussian binomial [m + n choose m]_q, built
// up one factor (1 - q^(n+i)) / (1 - q^i) at a time.

/// Largest `n1 * n2` tabulated by [`UDistribution::try_new`]
pub const EXACT_MAX_CELLS: usize = 250_000;

/// Permutation distribution of U for sample sizes `(n1, n2)`
#[derive(Debug, Clone)]
pub struct UDistribution {
    counts: Vec<f64>,
    total: f64,
}

impl UDistribution {
    /// Tabulate the distribution, or `None` when `n1 * n2` exceeds
    /// [`EXACT_MAX_CELLS`] or the counts no longer fit in an `f64`
    pub fn try_new(n1: usize, n2: usize) -> Option<Self> {
        let cells = n1.checked_mul(n2)?;
        if cells > EXACT_MAX_CELLS {
            return None;
        }
        let dist = Self::new(n1, n2);
        let finite = dist.total.is_finite() && dist.counts.iter().all(|c| c.is_finite());
        finite.then_some(dist)
    }

    /// Tabulate the distribution unconditionally; time and memory grow with
    /// `n1 * n2`
    pub fn new(n1: usize, n2: usize) -> Self {
        let (m, n) = (n1.min(n2), n1.max(n2));
        let len = m * n + 1;

        let mut counts = vec![0.0; len];
        counts[0] = 1.0;

        for i in 1..=m {
            let shift = n + i;
            for k in (shift..len).rev() {
                counts[k] -= counts[k - shift];
            }
            for k in i..len {
                counts[k] += counts[k - i];
            }
        }

        let total = counts.iter().sum();
        Self { counts, total }
    }

    /// Largest attainable U (`n1 * n2`)
    pub fn max_u(&self) -> usize {
        self.counts.len() - 1
    }

    /// Number of equally likely arrangements, `C(n1 + n2, n1)`
    pub fn arrangements(&self) -> f64 {
        self.total
    }

    pub fn pmf(&self, k: usize) -> f64 {
        self.counts.get(k).map_or(0.0, |c| c / self.total)
    }

    /// `P(U >= u)`; non-integral `u` (from midranks) is truncated first
    pub fn sf(&self, u: f64) -> f64 {
        if u <= 0.0 {
            return 1.0;
        }
        let start = u.floor() as usize;
        if start > self.max_u() {
            return 0.0;
        }
        // The distribution is symmetric; sum whichever tail is shorter.
        let mirrored = self.max_u() - start;
        let tail: f64 = if start > mirrored {
            self.counts[..=mirrored].iter().sum()
        } else {
            self.counts[start..].iter().sum()
        };
        (tail / self.total).clamp(0.0, 1.0)
    }

    /// `P(U <= u)`
    pub fn cdf(&self, u: f64) -> f64 {
        if u < 0.0 {
            return 0.0;
        }
        let end = (u.floor() as usize).min(self.max_u());
        let head: f64 = self.counts[..=end].iter().sum();
        (head / self.total).clamp(0.0, 1.0)
    }
}
