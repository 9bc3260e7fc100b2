//! Purity functions used to score density tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::density::DensityTable;

/// Scores a density table; higher means better separated groups.
///
/// Implementations may return NaN for degenerate tables. Search code never
/// keeps a NaN score as its best.
pub trait PurityFunction: fmt::Debug + Send + Sync {
    /// Short name of the function.
    fn name(&self) -> &'static str;

    /// Computes the score of `table`.
    fn compute(&self, table: &DensityTable) -> f64;
}

/// Built-in purity functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PurityKind {
    /// Information gain, in bits
    #[default]
    InfoGain,
    /// Information gain divided by the split information
    GainRatio,
    /// Decrease of the Gini impurity
    GiniGain,
}

impl PurityFunction for PurityKind {
    fn name(&self) -> &'static str {
        match self {
            PurityKind::InfoGain => "InfoGain",
            PurityKind::GainRatio => "GainRatio",
            PurityKind::GiniGain => "GiniGain",
        }
    }

    fn compute(&self, table: &DensityTable) -> f64 {
        match self {
            PurityKind::InfoGain => table.split_by_row_info_gain(),
            PurityKind::GainRatio => table.split_by_row_gain_ratio(),
            PurityKind::GiniGain => table.split_by_row_gini_gain(),
        }
    }
}

impl fmt::Display for PurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns true if `score` should replace `best`.
///
/// Comparison is strict so the first maximum wins; NaN never wins.
#[inline]
pub(crate) fn improves(score: f64, best: Option<f64>) -> bool {
    if score.is_nan() {
        return false;
    }
    match best {
        None => true,
        Some(best) => score > best,
    }
}
