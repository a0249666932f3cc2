// Midrank assignment over the pooled sample

/// Ranks of the pooled observations `x ++ y`
#[derive(Debug, Clone, PartialEq)]
pub struct PooledRanks {
    /// Midrank of every pooled observation, in input order (1-based)
    pub ranks: Vec<f64>,

    /// Size of every group of tied values with more than one member
    pub tie_groups: Vec<usize>,
}

impl PooledRanks {
    /// Rank the concatenation of `x` and `y`; tied values share the mean of
    /// the ranks they span.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let pooled: Vec<f64> = x.iter().chain(y.iter()).copied().collect();
        let mut order: Vec<usize> = (0..pooled.len()).collect();
        order.sort_by(|&a, &b| pooled[a].total_cmp(&pooled[b]));

        let mut ranks = vec![0.0; pooled.len()];
        let mut tie_groups = Vec::new();

        let mut start = 0;
        while start < order.len() {
            let mut end = start;
            while end + 1 < order.len() && pooled[order[end + 1]] == pooled[order[start]] {
                end += 1;
            }

            // Positions start..=end hold ranks start+1..=end+1
            let midrank = (start + end) as f64 / 2.0 + 1.0;
            for &idx in &order[start..=end] {
                ranks[idx] = midrank;
            }

            let size = end - start + 1;
            if size > 1 {
                tie_groups.push(size);
            }
            start = end + 1;
        }

        Self { ranks, tie_groups }
    }

    pub fn has_ties(&self) -> bool {
        !self.tie_groups.is_empty()
    }

    /// True when every pooled observation has the same value
    pub fn all_tied(&self) -> bool {
        self.tie_groups.len() == 1 && self.tie_groups[0] == self.ranks.len()
    }

    /// Sum of `t^3 - t` over tie groups (normal approximation correction)
    pub fn tie_term(&self) -> f64 {
        self.tie_groups
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }

    /// Rank sum of the first `n1` pooled observations
    pub fn rank_sum(&self, n1: usize) -> f64 {
        self.ranks[..n1].iter().sum()
    }
}
