//! Row predicates defining the groups of a split.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::types::RowIndex;
use crate::dataset::Frame;

/// A pure boolean test on one row of a frame.
///
/// Every variant except [`RowPredicate::All`] tests one named variable
/// and never matches a row whose value for that variable is missing, or a
/// frame that lacks the variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowPredicate {
    /// Matches every row
    All,
    /// `var <= value`
    NumLessEqual { var: String, value: f64 },
    /// `var > value`
    NumGreater { var: String, value: f64 },
    /// `var == level`
    NomEqual { var: String, level: String },
    /// `var != level`
    NomNotEqual { var: String, level: String },
    /// `var` is one of `levels`
    NomInSet { var: String, levels: BTreeSet<String> },
    /// `var` is none of `levels`
    NomNotInSet { var: String, levels: BTreeSet<String> },
    /// `var == value` for a boolean variable
    BinEqual { var: String, value: bool },
}

impl RowPredicate {
    /// `var <= value`
    pub fn num_less_equal<S: Into<String>>(var: S, value: f64) -> Self {
        RowPredicate::NumLessEqual { var: var.into(), value }
    }

    /// `var > value`
    pub fn num_greater<S: Into<String>>(var: S, value: f64) -> Self {
        RowPredicate::NumGreater { var: var.into(), value }
    }

    /// `var == level`
    pub fn nom_equal<S: Into<String>, L: Into<String>>(var: S, level: L) -> Self {
        RowPredicate::NomEqual { var: var.into(), level: level.into() }
    }

    /// `var != level`
    pub fn nom_not_equal<S: Into<String>, L: Into<String>>(var: S, level: L) -> Self {
        RowPredicate::NomNotEqual { var: var.into(), level: level.into() }
    }

    /// `var in levels`
    pub fn nom_in_set<S: Into<String>>(var: S, levels: BTreeSet<String>) -> Self {
        RowPredicate::NomInSet { var: var.into(), levels }
    }

    /// `var not in levels`
    pub fn nom_not_in_set<S: Into<String>>(var: S, levels: BTreeSet<String>) -> Self {
        RowPredicate::NomNotInSet { var: var.into(), levels }
    }

    /// `var == value`
    pub fn bin_equal<S: Into<String>>(var: S, value: bool) -> Self {
        RowPredicate::BinEqual { var: var.into(), value }
    }

    /// Name of the tested variable, `None` for [`RowPredicate::All`].
    pub fn var_name(&self) -> Option<&str> {
        match self {
            RowPredicate::All => None,
            RowPredicate::NumLessEqual { var, .. }
            | RowPredicate::NumGreater { var, .. }
            | RowPredicate::NomEqual { var, .. }
            | RowPredicate::NomNotEqual { var, .. }
            | RowPredicate::NomInSet { var, .. }
            | RowPredicate::NomNotInSet { var, .. }
            | RowPredicate::BinEqual { var, .. } => Some(var),
        }
    }

    /// Tests one row.
    pub fn test(&self, frame: &Frame, row: RowIndex) -> bool {
        let Some(name) = self.var_name() else {
            return true;
        };
        let Some(var) = frame.find_var(name) else {
            return false;
        };
        if frame.is_missing(row, var) {
            return false;
        }

        match self {
            RowPredicate::All => true,
            RowPredicate::NumLessEqual { value, .. } => frame.get_double(row, var) <= *value,
            RowPredicate::NumGreater { value, .. } => frame.get_double(row, var) > *value,
            RowPredicate::NomEqual { level, .. } => frame.get_label(row, var) == Some(level.as_str()),
            RowPredicate::NomNotEqual { level, .. } => {
                frame.get_label(row, var).is_some_and(|label| label != level)
            }
            RowPredicate::NomInSet { levels, .. } => {
                frame.get_label(row, var).is_some_and(|label| levels.contains(label))
            }
            RowPredicate::NomNotInSet { levels, .. } => {
                frame.get_label(row, var).is_some_and(|label| !levels.contains(label))
            }
            RowPredicate::BinEqual { value, .. } => frame.get_binary(row, var) == Some(*value),
        }
    }
}

impl fmt::Display for RowPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |levels: &BTreeSet<String>| {
            levels
                .iter()
                .map(|level| format!("'{}'", level))
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            RowPredicate::All => write!(f, "all"),
            RowPredicate::NumLessEqual { var, value } => write!(f, "{} <= {}", var, value),
            RowPredicate::NumGreater { var, value } => write!(f, "{} > {}", var, value),
            RowPredicate::NomEqual { var, level } => write!(f, "{} = '{}'", var, level),
            RowPredicate::NomNotEqual { var, level } => write!(f, "{} != '{}'", var, level),
            RowPredicate::NomInSet { var, levels } => write!(f, "{} in {{{}}}", var, join(levels)),
            RowPredicate::NomNotInSet { var, levels } => {
                write!(f, "{} not in {{{}}}", var, join(levels))
            }
            RowPredicate::BinEqual { var, value } => write!(f, "{} = {}", var, value),
        }
    }
}
