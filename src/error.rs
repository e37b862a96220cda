use thiserror::Error;

/// Which of the two sampling modes an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// The whole density treated as one distribution over all cells.
    Flattened,
    /// One independent distribution per lane along an axis.
    Axis,
}

impl std::fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingMode::Flattened => write!(f, "flattened"),
            SamplingMode::Axis => write!(f, "axis"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    /// Total mass (or the mass of one lane in axis mode) is zero, negative or non-finite.
    #[error("degenerate distribution: total mass {total} (lane {lane:?})")]
    DegenerateDistribution { total: f64, lane: Option<usize> },

    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    /// A single cell is negative or not finite. `index` is row-major.
    #[error("invalid weight {value} at flat index {index}")]
    InvalidWeight { index: usize, value: f64 },

    #[error("operation requires a {required} mode sampler")]
    ModeMismatch { required: SamplingMode },
}

pub type Result<T> = std::result::Result<T, SamplerError>;
