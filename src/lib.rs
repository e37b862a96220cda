//! Inverse-CDF sampling of event positions from gridded densities.
//!
//! The entry point is [`InverseCdfSampler`], which turns an N-D array of
//! non-negative weights (predicted counts on a spatial or temporal grid) into
//! continuous grid positions distributed like the weights. [`LightCurve`] uses
//! it to simulate photon arrival times from a tabulated rate.

mod error;
mod utils;

pub mod axis;
pub mod distribution;
pub mod inversion;
pub mod light_curve;
pub mod sampler;

pub use error::{Result, SamplerError, SamplingMode};
pub use light_curve::LightCurve;
pub use sampler::InverseCdfSampler;
pub use utils::unravel_index;
