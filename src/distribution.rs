use crate::Result;

// 1D piecewise constant distribution over cell indices
pub trait Discrete1D: Sized {
    // constructor, fails on degenerate or invalid weights
    fn build(weights: &[f64]) -> Result<Self>;

    // takes in rand [0-1), returns sampled idx in the original weight order
    fn sample(&self, u: f64) -> usize;

    // sum of all weights
    fn integral(&self) -> f64;

    // range of sampled idxs, should be len of weights
    fn size(&self) -> usize;
}

#[cfg(test)]
use {
    rand::{rngs::StdRng, Rng, SeedableRng},
    statrs::distribution::{ChiSquared, ContinuousCDF},
};

/// Pearson chi-squared p-value of `counts` against `expected` weights.
///
/// Cells with zero expected weight are left out of the statistic and must
/// have no observations.
#[cfg(test)]
pub fn chisq_pvalue(expected: &[f64], counts: &[usize]) -> f64 {
    let total_weight: f64 = expected.iter().sum();
    let sample_count: usize = counts.iter().sum();

    let mut chsq = 0.0;
    let mut cells = 0;
    for (exp, &obs) in expected.iter().zip(counts) {
        if *exp == 0.0 {
            assert_eq!(obs, 0, "observed samples in a zero-weight cell");
            continue;
        }
        let exp_count = exp / total_weight * sample_count as f64;
        let diff = obs as f64 - exp_count;
        chsq += diff * diff / exp_count;
        cells += 1;
    }

    1.0 - ChiSquared::new((cells - 1) as f64).unwrap().cdf(chsq)
}

#[cfg(test)]
pub fn chisq_distribution_1d<D: Discrete1D>(expected: &[f64], sample_count: usize) {
    let dist = D::build(expected).unwrap();
    let mut hist = vec![0usize; expected.len()];
    let mut rng = StdRng::seed_from_u64(0);

    for _ in 0..sample_count {
        let idx = dist.sample(rng.gen::<f64>());
        hist[idx] += 1;
    }

    let pval = chisq_pvalue(expected, &hist);
    assert!(pval >= 0.001, "failed chi-squared statistical test, p = {}", pval);
}

#[cfg(test)]
macro_rules! distribution_1d_tests {
    ($impl:path) => {
        mod distribution_1d {
            use crate::distribution::{chisq_distribution_1d, Discrete1D};
            use crate::SamplerError;
            use $impl as Dist;

            #[test]
            fn basic() {
                chisq_distribution_1d::<Dist>(&[1.0, 1.0, 2.0, 4.0, 8.0], 10_000);
            }

            #[test]
            fn uniform() {
                chisq_distribution_1d::<Dist>(&[1.0; 1_000], 200_000);
            }

            #[test]
            fn increasing() {
                let mut distr = [0.0; 100];
                for (i, weight) in distr.iter_mut().enumerate() {
                    *weight = (5 * (i + 1)) as f64;
                }
                chisq_distribution_1d::<Dist>(&distr, 100_000);
            }

            #[test]
            fn sparse() {
                chisq_distribution_1d::<Dist>(&[0.0, 3.0, 0.0, 0.0, 1.0, 0.0], 10_000);
            }

            #[test]
            fn integral_and_size() {
                let dist = Dist::build(&[0.5, 1.5, 2.0]).unwrap();
                assert!((dist.integral() - 4.0).abs() < 1e-12);
                assert_eq!(dist.size(), 3);
            }

            #[test]
            fn all_zero_is_degenerate() {
                assert!(matches!(
                    Dist::build(&[0.0; 8]),
                    Err(SamplerError::DegenerateDistribution { .. })
                ));
            }

            #[test]
            fn endpoints_in_range() {
                let dist = Dist::build(&[1.0, 2.0, 3.0]).unwrap();
                assert!(dist.sample(0.0) < 3);
                assert!(dist.sample(1.0 - f64::EPSILON) < 3);
            }
        }
    };
}
#[cfg(test)]
pub(crate) use distribution_1d_tests;
