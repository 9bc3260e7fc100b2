//! Routing of node rows into the children of a chosen split.

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use crate::core::error::{Result, SplitError};
use crate::core::types::{RowIndex, Weight};
use crate::dataset::Frame;

/// Rows and weights routed into one child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowGroup {
    /// Frame rows of the child
    pub rows: Vec<RowIndex>,
    /// Weight of each row inside the child
    pub weights: Vec<Weight>,
}

impl RowGroup {
    fn push(&mut self, row: RowIndex, weight: Weight) {
        self.rows.push(row);
        self.weights.push(weight);
    }

    /// Number of rows in the group.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the group holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the row weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Policy for rows matched by no group of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Splitter {
    /// Unmatched rows are dropped
    #[default]
    Ignore,
    /// Unmatched rows join the group with the most rows (earliest on ties)
    Majority,
    /// Unmatched rows join every group, weighted by the group's share of
    /// the matched rows
    ToAllWeighted,
    /// Each unmatched row joins one uniformly chosen group
    Random,
}

impl Splitter {
    /// Partitions `rows` by the predicates of `candidate`.
    ///
    /// `weights` holds one entry per row of `rows`. Each row joins the
    /// first group whose predicate matches; the splitter decides where the
    /// remaining rows go. Only [`Splitter::Random`] draws from `rng`.
    pub fn perform_split<R: Rng + ?Sized>(
        &self,
        frame: &Frame,
        rows: &[RowIndex],
        weights: &[Weight],
        candidate: &Candidate,
        rng: &mut R,
    ) -> Result<Vec<RowGroup>> {
        if rows.len() != weights.len() {
            return Err(SplitError::dimension_mismatch(
                format!("{} weights", rows.len()),
                format!("{} weights", weights.len()),
            ));
        }
        if let Some(&row) = rows.iter().find(|&&row| row >= frame.row_count()) {
            return Err(SplitError::index_out_of_bounds(row, frame.row_count()));
        }

        let groups = candidate.group_count();
        let mut children = vec![RowGroup::default(); groups];
        let mut unmatched = Vec::new();
        for (&row, &weight) in rows.iter().zip(weights) {
            match candidate.group_of(frame, row) {
                Some(group) => children[group].push(row, weight),
                None => unmatched.push((row, weight)),
            }
        }

        trace!(
            "{:?} split on {}: {} matched, {} unmatched",
            self,
            candidate.test_name(),
            rows.len() - unmatched.len(),
            unmatched.len()
        );
        if groups == 0 || unmatched.is_empty() {
            return Ok(children);
        }

        match self {
            Splitter::Ignore => {}
            Splitter::Majority => {
                let mut majority = 0;
                for (group, child) in children.iter().enumerate() {
                    if child.len() > children[majority].len() {
                        majority = group;
                    }
                }
                for (row, weight) in unmatched {
                    children[majority].push(row, weight);
                }
            }
            Splitter::ToAllWeighted => {
                let matched: usize = children.iter().map(RowGroup::len).sum();
                let shares: Vec<f64> = if matched == 0 {
                    vec![1.0 / groups as f64; groups]
                } else {
                    children
                        .iter()
                        .map(|child| child.len() as f64 / matched as f64)
                        .collect()
                };
                for (child, share) in children.iter_mut().zip(shares) {
                    for &(row, weight) in &unmatched {
                        child.push(row, weight * share);
                    }
                }
            }
            Splitter::Random => {
                for (row, weight) in unmatched {
                    let group = rng.gen_range(0..groups);
                    children[group].push(row, weight);
                }
            }
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::predicate::RowPredicate;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Frame, Candidate) {
        let df = Frame::builder()
            .double("x", vec![1.0, 2.0, 3.0, f64::NAN, 5.0, f64::NAN])
            .build()
            .unwrap();
        let candidate = Candidate::new(
            0.3,
            "x",
            vec![
                RowPredicate::num_less_equal("x", 2.5),
                RowPredicate::num_greater("x", 2.5),
            ],
        );
        (df, candidate)
    }

    fn split(splitter: Splitter) -> Vec<RowGroup> {
        let (df, candidate) = setup();
        let rows: Vec<usize> = (0..6).collect();
        let weights = vec![1.0; 6];
        let mut rng = StdRng::seed_from_u64(1);
        splitter
            .perform_split(&df, &rows, &weights, &candidate, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_ignore_drops_missing() {
        let children = split(Splitter::Ignore);
        assert_eq!(children[0].rows, vec![0, 1]);
        assert_eq!(children[1].rows, vec![2, 4]);
    }

    #[test]
    fn test_majority() {
        let (df, candidate) = setup();
        let rows = vec![0, 2, 3, 4];
        let weights = vec![1.0, 1.0, 2.0, 1.0];
        let mut rng = StdRng::seed_from_u64(1);
        let children = Splitter::Majority
            .perform_split(&df, &rows, &weights, &candidate, &mut rng)
            .unwrap();
        assert_eq!(children[0].rows, vec![0]);
        assert_eq!(children[1].rows, vec![2, 4, 3]);
        assert_eq!(children[1].total_weight(), 4.0);

        let children = split(Splitter::Majority);
        assert_eq!(children[0].rows, vec![0, 1, 3, 5]);
    }

    #[test]
    fn test_to_all_weighted() {
        let children = split(Splitter::ToAllWeighted);
        assert_eq!(children[0].rows, vec![0, 1, 3, 5]);
        assert_eq!(children[1].rows, vec![2, 4, 3, 5]);
        assert_abs_diff_eq!(children[0].weights[2], 0.5);
        let total: f64 = children.iter().map(RowGroup::total_weight).sum();
        assert_abs_diff_eq!(total, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_random_places_each_row_once() {
        let children = split(Splitter::Random);
        let placed: usize = children.iter().map(RowGroup::len).sum();
        assert_eq!(placed, 6);
        for row in [3, 5] {
            let hits = children.iter().filter(|c| c.rows.contains(&row)).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_invalid_input() {
        let (df, candidate) = setup();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Splitter::Ignore.perform_split(&df, &[0, 1], &[1.0], &candidate, &mut rng),
            Err(SplitError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Splitter::Ignore.perform_split(&df, &[9], &[1.0], &candidate, &mut rng),
            Err(SplitError::IndexOutOfBounds { .. })
        ));
    }
}
