//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::Sample;
use crate::constants::STEPSIZE_TOLERANCE;
use crate::error::{FwError, Result};

/// Check whether the training sample is valid or not.
pub fn sample(sample: &Sample) -> Result<()> {
    let (n_sample, n_feature) = sample.shape();

    // `data` and `target` must have the length greater than `0`.
    if n_sample == 0 || n_feature == 0 {
        return Err(FwError::EmptySample { n_sample, n_feature });
    }

    let n_target = sample.target().len();
    if n_target != n_sample {
        return Err(FwError::DimensionMismatch {
            expected: n_sample,
            got: n_target,
        });
    }
    Ok(())
}

/// Check whether the labels take values in `{-1, +1}`.
pub fn binary_labels(sample: &Sample) -> Result<()> {
    let bad = sample.target()
        .iter()
        .filter(|&&y| y != 1f64 && y != -1f64)
        .take(5)
        .map(|y| y.to_string())
        .collect::<Vec<_>>();
    if !bad.is_empty() {
        let line = bad.join(", ");
        return Err(FwError::InvalidLabels(format!(
            "labels must be -1 or +1. Ex. [{line}, ...]. \
             Use `Sample::binarize_target`."
        )));
    }
    Ok(())
}

/// Check the dimension of a vector.
pub fn dimension(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(FwError::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Check the radius of a constraint set.
pub fn radius(radius: f64) -> Result<()> {
    if !(radius.is_finite() && radius > 0f64) {
        return Err(FwError::InvalidParameter(format!(
            "the radius must be positive and finite. got {radius}."
        )));
    }
    Ok(())
}

/// Check the stepsize
#[inline(always)]
pub fn stepsize(size: f64) {
    assert!(
        (-STEPSIZE_TOLERANCE..=1f64 + STEPSIZE_TOLERANCE).contains(&size),
        "step size must be in [0, 1]. got {size}."
    );
}
