//! Inverse-CDF sampling of positions on an N-D density grid.
//!
//! A sampler is built once per density and then draws continuous grid
//! positions from it. Two modes exist:
//!
//! - flattened (`axis = None`): the whole array is one distribution over its
//!   cells; [`InverseCdfSampler::sample`] returns `(ndim, count)` positions.
//! - axis (`axis = Some(k)`): every lane along axis `k` is its own
//!   distribution; [`InverseCdfSampler::sample_axis`] returns one position per
//!   lane.
//!
//! Drawn indices are jittered by a uniform offset in `[-0.5, 0.5)` so the
//! result is continuous within each bin.
//!
//! ```
//! use inverse_cdf_sampling::InverseCdfSampler;
//! use ndarray::array;
//!
//! let density = array![0.0, 0.0, 1.0, 0.0];
//! let mut sampler = InverseCdfSampler::new(&density, None, 0).unwrap();
//! let positions = sampler.sample(5).unwrap();
//! assert_eq!(positions.dim(), (1, 5));
//! assert!(positions.iter().all(|p| (1.5..2.5).contains(p)));
//! ```

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayViewD, Data, Dimension};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::axis::AxisCdf;
use crate::distribution::Discrete1D;
use crate::error::SamplingMode;
use crate::inversion::SortedCdf;
use crate::utils;
use crate::{Result, SamplerError};

#[derive(Debug, Clone)]
enum Table {
    Flattened { shape: Vec<usize>, cdf: SortedCdf },
    Axis(AxisCdf),
}

/// Draws samples from a discretized density by inverting its CDF.
///
/// The random stream `R` is owned by the sampler. To share one stream between
/// several samplers, pass `&mut rng` to [`InverseCdfSampler::with_rng`].
#[derive(Debug, Clone)]
pub struct InverseCdfSampler<R = StdRng> {
    table: Table,
    rng: R,
}

impl InverseCdfSampler<StdRng> {
    /// Builds a sampler whose stream is a `StdRng` seeded with `seed`.
    pub fn new<S, D>(density: &ArrayBase<S, D>, axis: Option<usize>, seed: u64) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Self::with_rng(density, axis, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> InverseCdfSampler<R> {
    /// Builds a sampler drawing from `rng`.
    ///
    /// The density is read, never modified. Fails with
    /// [`SamplerError::InvalidShape`] for an empty density or an out of range
    /// axis, [`SamplerError::InvalidWeight`] for a negative or non-finite cell
    /// and [`SamplerError::DegenerateDistribution`] when the total mass (of
    /// the whole array, or of any lane in axis mode) is not positive.
    pub fn with_rng<S, D>(density: &ArrayBase<S, D>, axis: Option<usize>, rng: R) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let table = match axis {
            Some(axis) => Table::Axis(AxisCdf::build(density.to_owned().into_dyn(), axis)?),
            None => {
                let shape = density.shape().to_vec();
                if density.is_empty() {
                    return Err(SamplerError::InvalidShape {
                        shape,
                        reason: "density has no cells".into(),
                    });
                }
                // logical iteration order is row-major whatever the memory layout
                let flat = density.iter().copied().collect::<Vec<f64>>();
                let cdf = SortedCdf::build(&flat)?;
                Table::Flattened { shape, cdf }
            }
        };

        Ok(Self { table, rng })
    }

    /// Draws `count` positions from a flattened-mode sampler.
    ///
    /// The result has shape `(ndim, count)`: column `j` holds the coordinates
    /// of sample `j`, each jittered independently. All `count` uniform draws
    /// are taken from the stream before any jitter.
    pub fn sample(&mut self, count: usize) -> Result<Array2<f64>> {
        let (shape, cdf) = match &self.table {
            Table::Flattened { shape, cdf } => (shape, cdf),
            Table::Axis(_) => {
                return Err(SamplerError::ModeMismatch {
                    required: SamplingMode::Flattened,
                })
            }
        };

        let choices = (0..count).map(|_| self.rng.gen::<f64>()).collect::<Vec<f64>>();

        let mut positions = Array2::<f64>::zeros((shape.len(), count));
        for (j, u) in choices.into_iter().enumerate() {
            let coords = utils::unravel_index(cdf.sample(u), shape);
            for (dim, coord) in coords.into_iter().enumerate() {
                positions[[dim, j]] = coord as f64;
            }
        }

        let jitter = Uniform::new(-0.5, 0.5);
        for p in positions.iter_mut() {
            *p += jitter.sample(&mut self.rng);
        }

        log::trace!("drew {} flattened samples over shape {:?}", count, shape);
        Ok(positions)
    }

    /// Draws one position per lane from an axis-mode sampler.
    ///
    /// Each lane index is the one whose CDF value is nearest to the draw (see
    /// [`AxisCdf::nearest`]), which differs from the threshold search used by
    /// [`InverseCdfSampler::sample`].
    pub fn sample_axis(&mut self) -> Result<Array1<f64>> {
        let table = match &self.table {
            Table::Axis(table) => table,
            Table::Flattened { .. } => {
                return Err(SamplerError::ModeMismatch {
                    required: SamplingMode::Axis,
                })
            }
        };

        let lanes = table.lane_count();
        let choices = (0..lanes).map(|_| self.rng.gen::<f64>()).collect::<Vec<f64>>();
        let jitter = Uniform::new(-0.5, 0.5);
        let positions = table
            .nearest(&choices)
            .into_iter()
            .map(|idx| idx as f64 + jitter.sample(&mut self.rng))
            .collect::<Array1<f64>>();

        log::trace!("drew {} axis samples along axis {}", lanes, table.axis());
        Ok(positions)
    }
}

impl<R> InverseCdfSampler<R> {
    pub fn mode(&self) -> SamplingMode {
        match self.table {
            Table::Flattened { .. } => SamplingMode::Flattened,
            Table::Axis(_) => SamplingMode::Axis,
        }
    }

    pub fn axis(&self) -> Option<usize> {
        match &self.table {
            Table::Flattened { .. } => None,
            Table::Axis(table) => Some(table.axis()),
        }
    }

    /// Shape of the density the sampler was built from.
    pub fn shape(&self) -> &[usize] {
        match &self.table {
            Table::Flattened { shape, .. } => shape,
            Table::Axis(table) => table.shape(),
        }
    }

    /// The CDF: 1-D in sorted-weight order for flattened mode, the density's
    /// shape with per-lane CDFs for axis mode.
    pub fn cdf(&self) -> ArrayViewD<'_, f64> {
        match &self.table {
            Table::Flattened { cdf, .. } => ArrayView1::from(cdf.cdf()).into_dyn(),
            Table::Axis(table) => table.cdf(),
        }
    }

    /// Permutation from sorted rank to flat index; flattened mode only.
    pub fn sort_index(&self) -> Option<&[usize]> {
        match &self.table {
            Table::Flattened { cdf, .. } => Some(cdf.sort_index()),
            Table::Axis(_) => None,
        }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
