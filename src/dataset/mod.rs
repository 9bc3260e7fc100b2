//! Tabular data consumed by the split search.
//!
//! The engine reads rows through [`Frame`]: typed per-row accessors,
//! missing-value tests and nominal level catalogs. Row weights travel
//! separately as a plain `&[f64]`, one entry per row.

pub mod frame;

pub use frame::{Column, Frame, FrameBuilder};

use crate::core::error::{Result, SplitError};

/// Checks that `weights` holds exactly one finite, non-negative entry per
/// frame row.
pub fn validate_weights(frame: &Frame, weights: &[f64]) -> Result<()> {
    if weights.len() != frame.row_count() {
        return Err(SplitError::dimension_mismatch(
            format!("{} weights", frame.row_count()),
            format!("{} weights", weights.len()),
        ));
    }
    if let Some((row, w)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(SplitError::invalid_parameter(
            format!("weights[{}]", row),
            w.to_string(),
            "must be finite and non-negative",
        ));
    }
    Ok(())
}
