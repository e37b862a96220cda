use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::utils;
use crate::{Result, SamplerError};

/// Axis-mode table: an independent CDF for every lane along `axis`.
///
/// Lanes are the 1-D slices along `axis`, numbered in row-major order over the
/// remaining dimensions. For a 2-D density with `axis = 1` that is one lane per
/// row.
#[derive(Debug, Clone)]
pub struct AxisCdf {
    cdf: ArrayD<f64>,
    axis: usize,
}

impl AxisCdf {
    /// Takes ownership of a copy of the density and turns it into per-lane CDFs.
    pub fn build(mut density: ArrayD<f64>, axis: usize) -> Result<Self> {
        if density.is_empty() {
            return Err(SamplerError::InvalidShape {
                shape: density.shape().to_vec(),
                reason: "density has no cells".into(),
            });
        }
        if axis >= density.ndim() {
            return Err(SamplerError::InvalidShape {
                shape: density.shape().to_vec(),
                reason: format!("axis {} out of range for rank {}", axis, density.ndim()),
            });
        }
        utils::check_weights(density.iter())?;

        for (lane_index, mut lane) in density.lanes_mut(Axis(axis)).into_iter().enumerate() {
            let mut running = 0.0;
            for v in lane.iter_mut() {
                running += *v;
                *v = running;
            }
            if !(running > 0.0) || !running.is_finite() {
                return Err(SamplerError::DegenerateDistribution {
                    total: running,
                    lane: Some(lane_index),
                });
            }
            lane.mapv_inplace(|c| c / running);
        }

        let table = Self { cdf: density, axis };
        log::debug!(
            "built axis cdf along axis {} with {} lanes of length {}",
            axis,
            table.lane_count(),
            table.lane_len()
        );
        Ok(table)
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn shape(&self) -> &[usize] {
        self.cdf.shape()
    }

    pub fn cdf(&self) -> ArrayViewD<'_, f64> {
        self.cdf.view()
    }

    pub fn lane_len(&self) -> usize {
        self.cdf.len_of(Axis(self.axis))
    }

    pub fn lane_count(&self) -> usize {
        self.cdf.len() / self.lane_len()
    }

    /// For each lane paired with a draw, the index whose CDF value lies
    /// closest to the draw; the first index wins a tie.
    ///
    /// NOTE: this is nearest-value matching, not the "first cdf >= u" rule
    /// used by [`crate::inversion::SortedCdf::rank`]. It does not reproduce
    /// the density exactly: a lane with two equal weights yields index 0 three
    /// times out of four. Kept as is until the intended rule is settled.
    pub fn nearest(&self, draws: &[f64]) -> Vec<usize> {
        self.cdf
            .lanes(Axis(self.axis))
            .into_iter()
            .zip(draws)
            .map(|(lane, &u)| {
                let mut best = 0;
                let mut best_dist = f64::INFINITY;
                for (i, c) in lane.iter().enumerate() {
                    let dist = (u - c).abs();
                    if dist < best_dist {
                        best = i;
                        best_dist = dist;
                    }
                }
                best
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::AxisCdf;
    use crate::SamplerError;
    use ndarray::{array, Array, IxDyn};

    #[test]
    fn rows_end_at_one() {
        let density = array![[1.0, 2.0, 1.0], [0.0, 0.0, 5.0], [3.0, 3.0, 3.0]].into_dyn();
        let table = AxisCdf::build(density, 1).unwrap();
        assert_eq!(table.lane_count(), 3);
        assert_eq!(table.lane_len(), 3);

        let cdf = table.cdf();
        for row in cdf.outer_iter() {
            assert!((row[[2]] - 1.0).abs() < 1e-12);
            assert!(row.iter().zip(row.iter().skip(1)).all(|(a, b)| a <= b));
        }
        assert_eq!(cdf[[0, 0]], 0.25);
        assert_eq!(cdf[[0, 1]], 0.75);
    }

    #[test]
    fn columns_along_axis_zero() {
        let density = array![[1.0, 0.0], [1.0, 4.0]].into_dyn();
        let table = AxisCdf::build(density, 0).unwrap();
        let cdf = table.cdf();
        assert_eq!(cdf[[0, 0]], 0.5);
        assert_eq!(cdf[[1, 0]], 1.0);
        assert_eq!(cdf[[0, 1]], 0.0);
        assert_eq!(cdf[[1, 1]], 1.0);
    }

    #[test]
    fn nearest_not_threshold() {
        let density = array![[1.0, 1.0], [1.0, 1.0], [1.0, 3.0]].into_dyn();
        let table = AxisCdf::build(density, 1).unwrap();
        // lane cdfs: [0.5, 1.0], [0.5, 1.0], [0.25, 1.0]
        // a threshold search would give 1 for the first draw
        assert_eq!(table.nearest(&[0.7, 0.8, 0.6]), vec![0, 1, 0]);
    }

    #[test]
    fn nearest_tie_takes_first() {
        let density = array![[1.0, 1.0]].into_dyn();
        let table = AxisCdf::build(density, 1).unwrap();
        assert_eq!(table.nearest(&[0.75]), vec![0]);
    }

    #[test]
    fn three_dimensional_lanes() {
        let density = Array::from_elem(IxDyn(&[2, 3, 4]), 1.0);
        let table = AxisCdf::build(density, 1).unwrap();
        assert_eq!(table.lane_count(), 8);
        assert_eq!(table.lane_len(), 3);
        assert_eq!(table.nearest(&[0.0; 8]).len(), 8);
    }

    #[test]
    fn zero_row_is_degenerate() {
        let density = array![[1.0, 1.0], [0.0, 0.0]].into_dyn();
        assert_eq!(
            AxisCdf::build(density, 1).unwrap_err(),
            SamplerError::DegenerateDistribution { total: 0.0, lane: Some(1) }
        );
    }

    #[test]
    fn axis_out_of_range() {
        let density = array![[1.0, 1.0]].into_dyn();
        assert!(matches!(
            AxisCdf::build(density, 2),
            Err(SamplerError::InvalidShape { .. })
        ));
    }

    #[test]
    fn empty_density() {
        let density = Array::<f64, _>::zeros(IxDyn(&[3, 0]));
        assert!(matches!(
            AxisCdf::build(density, 0),
            Err(SamplerError::InvalidShape { .. })
        ));
    }
}
