//! Weighted contingency tables between partition groups and target levels.
//!
//! Rows of a [`DensityTable`] are the groups produced by a split attempt,
//! columns are the levels of the target variable. A table may carry the
//! missing-target sentinel as column 0; [`DensityTable::with_missing`]
//! tells which layout is in use.

use ndarray::{Array2, ArrayView2, Axis};

use crate::core::constants::MISSING_LEVEL;
use crate::core::error::{Result, SplitError};
use crate::core::types::{VarIndex, VarKind};
use crate::dataset::Frame;

/// Two-way table of accumulated weights.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTable {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    with_missing: bool,
    values: Array2<f64>,
}

impl DensityTable {
    /// Builds a zeroed table from explicit labels. When `with_missing` is
    /// true, column 0 is treated as the missing-target sentinel.
    pub fn new(row_labels: Vec<String>, col_labels: Vec<String>, with_missing: bool) -> Self {
        let values = Array2::zeros((row_labels.len(), col_labels.len()));
        DensityTable {
            row_labels,
            col_labels,
            with_missing,
            values,
        }
    }

    /// Builds a zeroed table whose columns come from a level catalog.
    ///
    /// `col_levels` starts with the missing slot; the slot is kept as
    /// column 0 only when `with_missing` is true.
    pub fn empty<R, C>(with_missing: bool, row_labels: &[R], col_levels: &[C]) -> Self
    where
        R: AsRef<str>,
        C: AsRef<str>,
    {
        let skip = if with_missing { 0 } else { 1 };
        let cols = col_levels
            .iter()
            .skip(skip)
            .map(|label| label.as_ref().to_string())
            .collect();
        let rows = row_labels
            .iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        Self::new(rows, cols, with_missing)
    }

    /// Builds a table from two nominal variables: one row per level of
    /// `row_var`, one column per level of `col_var`.
    ///
    /// Cells hold weights when `weights` is given, row counts otherwise.
    /// Without `with_missing`, rows missing either value are skipped and
    /// both missing slots are dropped; with it, missing values land in
    /// row/column 0.
    pub fn from_levels(
        with_missing: bool,
        frame: &Frame,
        row_var: VarIndex,
        col_var: VarIndex,
        weights: Option<&[f64]>,
    ) -> Result<Self> {
        for var in [row_var, col_var] {
            if frame.var_kind(var) != VarKind::Nominal {
                return Err(SplitError::variable_type(
                    frame.var_name(var),
                    "nominal",
                    frame.var_kind(var),
                ));
            }
        }

        let row_levels = frame.levels(row_var)?;
        let skip = if with_missing { 0 } else { 1 };
        let rows: Vec<&String> = row_levels.iter().skip(skip).collect();
        let mut table = Self::empty(with_missing, &rows, frame.levels(col_var)?);

        for row in 0..frame.row_count() {
            let r = frame.get_level(row, row_var);
            let c = frame.get_level(row, col_var);
            if !with_missing && (r == MISSING_LEVEL || c == MISSING_LEVEL) {
                continue;
            }
            let w = weights.map_or(1.0, |w| w[row]);
            table.increment(r - skip, c - skip, w);
        }
        Ok(table)
    }

    /// Number of groups.
    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of target columns, sentinel included when present.
    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Group labels.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Target level labels.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// True when column 0 is the missing-target sentinel.
    pub fn with_missing(&self) -> bool {
        self.with_missing
    }

    /// Read-only view of the cells.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Value of a cell.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }

    /// Adds `weight` to a cell. Negative weights undo a previous increment
    /// when weight is moved between groups.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[inline]
    pub fn increment(&mut self, row: usize, col: usize, weight: f64) {
        self.values[[row, col]] += weight;
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// Per-group totals.
    pub fn row_totals(&self) -> Vec<f64> {
        self.values.sum_axis(Axis(1)).to_vec()
    }

    /// Per-target-level totals.
    pub fn col_totals(&self) -> Vec<f64> {
        self.values.sum_axis(Axis(0)).to_vec()
    }

    /// Returns true if at least `required_groups` groups individually hold
    /// a total of at least `min_count` over the real target columns (the
    /// sentinel column does not count).
    pub fn has_cols_with_minimum_count(&self, min_count: f64, required_groups: usize) -> bool {
        let first = if self.with_missing { 1 } else { 0 };
        let mut count = 0;
        for row in self.values.rows() {
            let total: f64 = row.iter().skip(first).sum();
            if total >= min_count {
                count += 1;
                if count >= required_groups {
                    return true;
                }
            }
        }
        false
    }

    /// Information gain of splitting the target by rows, in bits.
    pub fn split_by_row_info_gain(&self) -> f64 {
        entropy(&self.col_totals()) - self.split_by_row_average_entropy()
    }

    /// Information gain normalized by the intrinsic information of the groups.
    pub fn split_by_row_gain_ratio(&self) -> f64 {
        self.split_by_row_info_gain() / entropy(&self.row_totals())
    }

    /// Gini gain of splitting the target by rows. An empty table scores 1.
    pub fn split_by_row_gini_gain(&self) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 1.0;
        }

        let row_totals = self.row_totals();
        let col_totals = self.col_totals();

        let mut gini = 1.0 - col_totals.iter().map(|&c| (c / total).powi(2)).sum::<f64>();
        for (i, &row_total) in row_totals.iter().enumerate() {
            let mut group_gini = 1.0;
            if row_total > 0.0 {
                for j in 0..self.cols() {
                    group_gini -= (self.get(i, j) / row_total).powi(2);
                }
            }
            gini -= group_gini * row_total / total;
        }
        gini
    }

    /// Weighted average of the per-group target entropies.
    fn split_by_row_average_entropy(&self) -> f64 {
        let row_totals = self.row_totals();
        let total: f64 = row_totals.iter().sum();
        let mut average = 0.0;
        for (i, row) in self.values.rows().into_iter().enumerate() {
            for &value in row.iter() {
                if value > 0.0 {
                    average += -(value / row_totals[i]).log2() * value / total;
                }
            }
        }
        average
    }
}

/// Shannon entropy, in bits, of a vector of non-negative totals.
fn entropy(totals: &[f64]) -> f64 {
    let total: f64 = totals.iter().sum();
    totals
        .iter()
        .filter(|&&value| value > 0.0)
        .map(|&value| -(value / total).log2() * value / total)
        .sum()
}
