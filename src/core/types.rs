//! Core data types shared by the frame, the density tables and the
//! search strategies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row position inside a frame.
pub type RowIndex = usize;

/// Position of a variable (column) inside a frame.
pub type VarIndex = usize;

/// Index into a nominal level catalog. Slot 0 is the missing sentinel.
pub type LevelIndex = usize;

/// Row weight type.
pub type Weight = f64;

/// Split score type; higher is better.
pub type Score = f64;

/// Kind of a frame variable, used to pick a search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    /// Continuous values; NaN marks a missing value
    Double,
    /// Integer values
    Int,
    /// Categorical values coded against a level catalog
    Nominal,
    /// Boolean values
    Binary,
}

impl VarKind {
    /// Returns true for kinds whose values are ordered numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, VarKind::Double | VarKind::Int)
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarKind::Double => write!(f, "double"),
            VarKind::Int => write!(f, "int"),
            VarKind::Nominal => write!(f, "nominal"),
            VarKind::Binary => write!(f, "binary"),
        }
    }
}
