use num_traits::Float;

pub fn kahan_sum<F: Float>(input: impl IntoIterator<Item = F>) -> F {
    let mut sum = F::zero();
    let mut err = F::zero();
    for v in input {
        let y = v - err;
        let t = sum + y;
        err = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Converts a row-major flat index into per-dimension coordinates of `shape`.
///
/// Every extent in `shape` must be non-zero and `flat` must be smaller than
/// the product of the extents.
pub fn unravel_index(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; shape.len()];
    for (coord, &extent) in coords.iter_mut().zip(shape).rev() {
        *coord = flat % extent;
        flat /= extent;
    }
    coords
}

// weights must be finite and non-negative
pub(crate) fn check_weights<'a>(weights: impl IntoIterator<Item = &'a f64>) -> crate::Result<()> {
    for (index, &value) in weights.into_iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(crate::SamplerError::InvalidWeight { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    #[test]
    fn kahan_sum_tenths() {
        let tenths = [0.1f64; 10];
        let naive: f64 = tenths.iter().sum();
        let compensated = kahan_sum(tenths.iter().copied());
        assert!((compensated - 1.0).abs() <= (naive - 1.0).abs());
        assert!((compensated - 1.0).abs() < 1e-15);
    }

    #[test]
    fn unravel_matches_row_major_iteration() {
        let shape = [3, 4, 5];
        let grid = Array::from_shape_fn(IxDyn(&shape), |idx| (idx[0] * 100 + idx[1] * 10 + idx[2]) as f64);
        for (flat, value) in grid.iter().enumerate() {
            let coords = unravel_index(flat, &shape);
            assert_eq!(grid[IxDyn(&coords)], *value);
            assert!(coords.iter().zip(&shape).all(|(c, e)| c < e));
        }
    }

    #[test]
    fn unravel_scalar_shape() {
        assert!(unravel_index(0, &[]).is_empty());
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(check_weights(&[0.0, 1.0, 2.5]).is_ok());
        assert_eq!(
            check_weights(&[1.0, -1.0]),
            Err(crate::SamplerError::InvalidWeight { index: 1, value: -1.0 })
        );
        assert!(matches!(
            check_weights(&[f64::NAN]),
            Err(crate::SamplerError::InvalidWeight { index: 0, .. })
        ));
    }
}
