use crate::distribution::Discrete1D;
use crate::utils;
use crate::{Result, SamplerError};

/// Flattened-mode table: a CDF built over the weights sorted ascending.
///
/// Sorting makes the CDF a single ordered sequence that can be searched with
/// a binary search. The permutation `sort_index` maps a rank in that order back
/// to the cell's position in the caller's flattened array.
#[derive(Debug, Clone)]
pub struct SortedCdf {
    sort_index: Box<[usize]>,
    pdf: Box<[f64]>,
    cdf: Box<[f64]>,
    total: f64,
}

impl SortedCdf {
    /// Rank in sorted order for a uniform draw `u` in [0-1).
    ///
    /// Picks the first entry with `cdf > u`, so a zero-mass cell is never
    /// returned. The last entry may fall slightly short of 1, hence the clamp.
    pub fn rank(&self, u: f64) -> usize {
        let rank = self.cdf.partition_point(|c| *c <= u);
        rank.min(self.cdf.len() - 1)
    }

    pub fn sort_index(&self) -> &[usize] {
        &self.sort_index
    }

    /// Normalized weights in sorted order.
    pub fn pdf(&self) -> &[f64] {
        &self.pdf
    }

    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }
}

impl Discrete1D for SortedCdf {
    fn build(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(SamplerError::InvalidShape {
                shape: vec![0],
                reason: "density has no cells".into(),
            });
        }
        utils::check_weights(weights)?;

        let total = utils::kahan_sum(weights.iter().copied());
        if !(total > 0.0) || !total.is_finite() {
            return Err(SamplerError::DegenerateDistribution { total, lane: None });
        }

        // stable, so equal weights keep their flat order
        let mut sort_index = (0..weights.len()).collect::<Box<[usize]>>();
        sort_index.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));

        let pdf = sort_index.iter().map(|&i| weights[i] / total).collect::<Box<[f64]>>();

        let mut cdf = pdf.clone();
        for i in 1..cdf.len() {
            cdf[i] = cdf[i - 1] + cdf[i];
        }

        log::debug!(
            "built sorted cdf over {} cells, total mass {}, final cdf {}",
            weights.len(),
            total,
            cdf[cdf.len() - 1]
        );

        Ok(Self {
            sort_index,
            pdf,
            cdf,
            total,
        })
    }

    fn sample(&self, u: f64) -> usize {
        self.sort_index[self.rank(u)]
    }

    fn integral(&self) -> f64 {
        self.total
    }

    fn size(&self) -> usize {
        self.cdf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::SortedCdf;
    use crate::distribution::{distribution_1d_tests, Discrete1D};

    distribution_1d_tests!(crate::inversion::SortedCdf);

    #[test]
    fn cdf_is_sorted_and_normalized() {
        let table = SortedCdf::build(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(table.sort_index(), &[1, 3, 2, 0]);
        assert_eq!(table.pdf(), &[0.1, 0.2, 0.3, 0.4]);
        let cdf = table.cdf();
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        assert!((cdf[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rank_is_threshold_search() {
        let table = SortedCdf::build(&[1.0, 1.0, 2.0]).unwrap();
        // sorted cdf: [0.25, 0.5, 1.0]
        assert_eq!(table.rank(0.0), 0);
        assert_eq!(table.rank(0.24), 0);
        assert_eq!(table.rank(0.26), 1);
        assert_eq!(table.rank(0.75), 2);
        assert_eq!(table.rank(0.999), 2);
    }

    #[test]
    fn rank_clamps_past_the_end() {
        let table = SortedCdf::build(&[1.0, 2.0]).unwrap();
        assert_eq!(table.rank(1.0), 1);
        assert_eq!(table.rank(2.0), 1);
    }

    #[test]
    fn zero_cells_never_sampled() {
        let table = SortedCdf::build(&[0.0, 0.0, 1.0, 0.0]).unwrap();
        for u in [0.0, 0.1, 0.5, 0.9999] {
            assert_eq!(table.sample(u), 2);
        }
    }

    #[test]
    fn empty_weights_are_rejected() {
        assert!(SortedCdf::build(&[]).is_err());
    }
}
