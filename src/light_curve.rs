use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{InverseCdfSampler, Result, SamplerError};

/// A rate tabulated on increasing time nodes, used to simulate arrival times.
///
/// Node `i` is treated as a bin centered on `times[i]`. Sampled grid positions
/// are mapped to time by linear interpolation between neighbouring nodes, and
/// by extrapolation over the outer half bins.
#[derive(Debug, Clone)]
pub struct LightCurve {
    times: Array1<f64>,
    rates: Array1<f64>,
}

impl LightCurve {
    pub fn new(times: Array1<f64>, rates: Array1<f64>) -> Result<Self> {
        if times.len() < 2 || times.len() != rates.len() {
            return Err(SamplerError::InvalidShape {
                shape: vec![times.len(), rates.len()],
                reason: "light curve needs at least two nodes and one rate per node".into(),
            });
        }
        let increasing = times.iter().zip(times.iter().skip(1)).all(|(a, b)| a < b);
        if !increasing || !times.iter().all(|t| t.is_finite()) {
            return Err(SamplerError::InvalidShape {
                shape: vec![times.len()],
                reason: "light curve times must be finite and strictly increasing".into(),
            });
        }
        // surface bad rates now rather than on the first draw
        InverseCdfSampler::new(&rates, None, 0)?;

        Ok(Self { times, rates })
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn rates(&self) -> &Array1<f64> {
        &self.rates
    }

    /// Draws `count` arrival times using `rng` as the random stream.
    pub fn sample_times<R: Rng>(&self, count: usize, rng: R) -> Result<Array1<f64>> {
        let mut sampler = InverseCdfSampler::with_rng(&self.rates, None, rng)?;
        let positions = sampler.sample(count)?;
        Ok(positions.row(0).mapv(|p| self.position_to_time(p)))
    }

    pub fn sample_times_seeded(&self, count: usize, seed: u64) -> Result<Array1<f64>> {
        self.sample_times(count, StdRng::seed_from_u64(seed))
    }

    fn position_to_time(&self, position: f64) -> f64 {
        let last = self.times.len() - 2;
        let i = (position.floor().max(0.0) as usize).min(last);
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        t0 + (position - i as f64) * (t1 - t0)
    }
}
