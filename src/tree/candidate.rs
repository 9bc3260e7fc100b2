//! Scored split proposals.

use serde::{Deserialize, Serialize};

use super::predicate::RowPredicate;
use crate::core::types::{RowIndex, Score};
use crate::dataset::Frame;

/// A proposed split of one variable: its score and the ordered predicates
/// defining each child group.
///
/// Groups are disjoint. Apart from rows whose tested value is missing,
/// every row matches exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    score: Score,
    test_name: String,
    group_predicates: Vec<RowPredicate>,
}

impl Candidate {
    /// Creates a candidate from its score, tested variable and groups.
    pub fn new<S: Into<String>>(score: Score, test_name: S, group_predicates: Vec<RowPredicate>) -> Self {
        Candidate {
            score,
            test_name: test_name.into(),
            group_predicates,
        }
    }

    /// Score of the split; higher is better.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Name of the tested variable.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Group predicates in child order.
    pub fn group_predicates(&self) -> &[RowPredicate] {
        &self.group_predicates
    }

    /// Number of child groups.
    pub fn group_count(&self) -> usize {
        self.group_predicates.len()
    }

    /// Index of the first group matching `row`, `None` for rows whose
    /// tested value is missing.
    pub fn group_of(&self, frame: &Frame, row: RowIndex) -> Option<usize> {
        self.group_predicates
            .iter()
            .position(|predicate| predicate.test(frame, row))
    }
}
