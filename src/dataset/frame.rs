//! In-memory columnar frame consumed by the split search.
//!
//! Every column knows its own missing-value representation: NaN for
//! doubles, `None` for integers and booleans, and the reserved level slot
//! [`MISSING_LEVEL`] for nominal columns. Nominal catalogs always start
//! with [`MISSING_LABEL`].

use std::collections::HashMap;

use crate::core::constants::{MISSING_LABEL, MISSING_LEVEL};
use crate::core::error::{Result, SplitError};
use crate::core::types::{LevelIndex, RowIndex, VarIndex, VarKind};

/// Storage of one frame variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Continuous values; NaN is missing
    Double(Vec<f64>),
    /// Integer values
    Int(Vec<Option<i64>>),
    /// Level codes into `levels`; code 0 is missing
    Nominal {
        /// Per-row level codes
        codes: Vec<LevelIndex>,
        /// Level catalog, slot 0 holds the missing label
        levels: Vec<String>,
    },
    /// Boolean values
    Binary(Vec<Option<bool>>),
}

impl Column {
    /// Kind of the column.
    pub fn kind(&self) -> VarKind {
        match self {
            Column::Double(_) => VarKind::Double,
            Column::Int(_) => VarKind::Int,
            Column::Nominal { .. } => VarKind::Nominal,
            Column::Binary(_) => VarKind::Binary,
        }
    }

    /// Number of rows stored in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Double(values) => values.len(),
            Column::Int(values) => values.len(),
            Column::Nominal { codes, .. } => codes.len(),
            Column::Binary(values) => values.len(),
        }
    }

    /// Returns true when the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn is_missing(&self, row: RowIndex) -> bool {
        match self {
            Column::Double(values) => values[row].is_nan(),
            Column::Int(values) => values[row].is_none(),
            Column::Nominal { codes, .. } => codes[row] == MISSING_LEVEL,
            Column::Binary(values) => values[row].is_none(),
        }
    }
}

/// A named collection of equally long columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
    index: HashMap<String, VarIndex>,
    rows: usize,
}

impl Frame {
    /// Starts building a frame.
    pub fn builder() -> FrameBuilder {
        FrameBuilder::new()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.columns.len()
    }

    /// Variable names in column order.
    pub fn var_names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a variable name.
    pub fn var_index(&self, name: &str) -> Result<VarIndex> {
        self.find_var(name)
            .ok_or_else(|| SplitError::unknown_variable(name))
    }

    /// Resolves a variable name, returning `None` when it is absent.
    pub fn find_var(&self, name: &str) -> Option<VarIndex> {
        self.index.get(name).copied()
    }

    /// Name of the variable at `var`.
    pub fn var_name(&self, var: VarIndex) -> &str {
        &self.names[var]
    }

    /// Kind of the variable at `var`.
    pub fn var_kind(&self, var: VarIndex) -> VarKind {
        self.columns[var].kind()
    }

    /// Raw column storage.
    pub fn column(&self, var: VarIndex) -> &Column {
        &self.columns[var]
    }

    /// Returns true if the value at (`row`, `var`) is missing.
    #[inline]
    pub fn is_missing(&self, row: RowIndex, var: VarIndex) -> bool {
        self.columns[var].is_missing(row)
    }

    /// Numeric view of a value. Missing values read as NaN, booleans as
    /// 1/0 and nominal values as their level code.
    #[inline]
    pub fn get_double(&self, row: RowIndex, var: VarIndex) -> f64 {
        match &self.columns[var] {
            Column::Double(values) => values[row],
            Column::Int(values) => values[row].map_or(f64::NAN, |v| v as f64),
            Column::Nominal { codes, .. } => {
                if codes[row] == MISSING_LEVEL {
                    f64::NAN
                } else {
                    codes[row] as f64
                }
            }
            Column::Binary(values) => match values[row] {
                Some(true) => 1.0,
                Some(false) => 0.0,
                None => f64::NAN,
            },
        }
    }

    /// Level code of a nominal value; [`MISSING_LEVEL`] for missing values
    /// and for non-nominal variables.
    #[inline]
    pub fn get_level(&self, row: RowIndex, var: VarIndex) -> LevelIndex {
        match &self.columns[var] {
            Column::Nominal { codes, .. } => codes[row],
            _ => MISSING_LEVEL,
        }
    }

    /// Label of a nominal value, `None` when missing or not nominal.
    #[inline]
    pub fn get_label(&self, row: RowIndex, var: VarIndex) -> Option<&str> {
        match &self.columns[var] {
            Column::Nominal { codes, levels } if codes[row] != MISSING_LEVEL => {
                Some(levels[codes[row]].as_str())
            }
            _ => None,
        }
    }

    /// Boolean value, `None` when missing or not binary.
    #[inline]
    pub fn get_binary(&self, row: RowIndex, var: VarIndex) -> Option<bool> {
        match &self.columns[var] {
            Column::Binary(values) => values[row],
            _ => None,
        }
    }

    /// Level catalog of a nominal variable, slot 0 included.
    pub fn levels(&self, var: VarIndex) -> Result<&[String]> {
        match &self.columns[var] {
            Column::Nominal { levels, .. } => Ok(levels),
            other => Err(SplitError::variable_type(
                self.names[var].as_str(),
                "nominal",
                other.kind(),
            )),
        }
    }

    /// A weight vector of ones, one entry per row.
    pub fn unit_weights(&self) -> Vec<f64> {
        vec![1.0; self.rows]
    }
}

/// Builder for [`Frame`].
///
/// Column errors are collected and reported together by [`FrameBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    names: Vec<String>,
    columns: Vec<Column>,
    validation_errors: Vec<String>,
}

impl FrameBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a double column; NaN values are missing.
    pub fn double<S: Into<String>>(mut self, name: S, values: Vec<f64>) -> Self {
        self.push(name.into(), Column::Double(values));
        self
    }

    /// Adds an integer column.
    pub fn int<S: Into<String>>(mut self, name: S, values: Vec<Option<i64>>) -> Self {
        self.push(name.into(), Column::Int(values));
        self
    }

    /// Adds a boolean column.
    pub fn binary<S: Into<String>>(mut self, name: S, values: Vec<Option<bool>>) -> Self {
        self.push(name.into(), Column::Binary(values));
        self
    }

    /// Adds a nominal column. The level catalog is built in first-seen
    /// order after the missing slot; the label `"?"` marks a missing value.
    pub fn nominal<S, I, L>(mut self, name: S, labels: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut levels = vec![MISSING_LABEL.to_string()];
        let mut lookup: HashMap<String, LevelIndex> = HashMap::new();
        let codes = labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref();
                if label == MISSING_LABEL {
                    return MISSING_LEVEL;
                }
                *lookup.entry(label.to_string()).or_insert_with(|| {
                    levels.push(label.to_string());
                    levels.len() - 1
                })
            })
            .collect();
        self.push(name.into(), Column::Nominal { codes, levels });
        self
    }

    /// Adds a nominal column with a fixed catalog. `levels` lists the
    /// non-missing levels in order; labels outside the catalog, a listed
    /// `"?"` and repeated levels are errors.
    pub fn nominal_with_levels<S, I, L>(mut self, name: S, levels: &[&str], labels: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let name = name.into();
        let mut catalog = vec![MISSING_LABEL.to_string()];
        for &level in levels {
            if catalog.iter().any(|known| known == level) {
                self.validation_errors.push(format!(
                    "level '{}' of column {} is reserved or listed more than once",
                    level, name
                ));
            } else {
                catalog.push(level.to_string());
            }
        }
        let lookup: HashMap<&str, LevelIndex> = catalog
            .iter()
            .enumerate()
            .map(|(code, label)| (label.as_str(), code))
            .collect();

        let mut codes = Vec::new();
        for label in labels {
            match lookup.get(label.as_ref()) {
                Some(&code) => codes.push(code),
                None => {
                    self.validation_errors.push(format!(
                        "label '{}' of column {} is not in its level catalog",
                        label.as_ref(),
                        name
                    ));
                    codes.push(MISSING_LEVEL);
                }
            }
        }
        self.push(name, Column::Nominal { codes, levels: catalog });
        self
    }

    fn push(&mut self, name: String, column: Column) {
        if self.names.contains(&name) {
            self.validation_errors
                .push(format!("column {} is defined more than once", name));
        }
        self.names.push(name);
        self.columns.push(column);
    }

    /// Build the frame
    pub fn build(self) -> Result<Frame> {
        let rows = self.columns.first().map_or(0, Column::len);
        let mut errors = self.validation_errors;
        for (name, column) in self.names.iter().zip(&self.columns) {
            if column.len() != rows {
                errors.push(format!(
                    "column {} has {} rows, expected {}",
                    name,
                    column.len(),
                    rows
                ));
            }
        }
        if !errors.is_empty() {
            return Err(crate::dataset_error!(
                "Frame validation failed: {}",
                errors.join(", ")
            ));
        }

        let index = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Frame {
            names: self.names,
            columns: self.columns,
            index,
            rows,
        })
    }
}
