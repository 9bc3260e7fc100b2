//! Split search strategies.
//!
//! A [`Search`] looks at one test variable against a nominal target and
//! proposes at most one [`Candidate`]. Ordinary data conditions such as
//! too few rows or no usable boundary yield `Ok(None)`; structural misuse
//! (unknown variables, a non-nominal target, a test variable of a kind the
//! strategy does not handle, malformed weights, a zero minimum count) is an
//! error.

mod binary;
mod nominal;
mod numeric;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::Candidate;
use super::density::DensityTable;
use super::purity::PurityFunction;
use crate::config::SearchConfig;
use crate::core::error::{Result, SplitError};
use crate::core::types::{VarIndex, VarKind};
use crate::dataset::{validate_weights, Frame};

/// Closed set of split search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Search {
    /// Never proposes a split
    Ignore,
    /// Splits a numeric variable at the value of one random non-missing row
    NumericRandom,
    /// Best threshold between consecutive distinct numeric values
    NumericBinary,
    /// One group per boolean value
    Binary,
    /// One group per nominal level
    NominalFull,
    /// Best two-way partition of the nominal levels
    NominalBinary,
}

impl Search {
    /// All strategies, in declaration order.
    pub const ALL: [Search; 6] = [
        Search::Ignore,
        Search::NumericRandom,
        Search::NumericBinary,
        Search::Binary,
        Search::NominalFull,
        Search::NominalBinary,
    ];

    /// Strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Search::Ignore => "Ignore",
            Search::NumericRandom => "NumericRandom",
            Search::NumericBinary => "NumericBinary",
            Search::Binary => "Binary",
            Search::NominalFull => "NominalFull",
            Search::NominalBinary => "NominalBinary",
        }
    }

    /// Returns true if the strategy can test a variable of `kind`.
    pub fn accepts(&self, kind: VarKind) -> bool {
        match self {
            Search::Ignore => true,
            Search::NumericRandom | Search::NumericBinary => kind.is_numeric(),
            Search::Binary => kind == VarKind::Binary,
            Search::NominalFull | Search::NominalBinary => kind == VarKind::Nominal,
        }
    }

    fn expected_kinds(&self) -> &'static str {
        match self {
            Search::Ignore => "any",
            Search::NumericRandom | Search::NumericBinary => "double or int",
            Search::Binary => "binary",
            Search::NominalFull | Search::NominalBinary => "nominal",
        }
    }

    /// Computes the best candidate for splitting the rows of `frame` on
    /// `test_name` with respect to the nominal `target_name`.
    ///
    /// Only [`Search::NumericRandom`] draws from `rng`.
    pub fn compute_candidate<R: Rng + ?Sized>(
        &self,
        config: &SearchConfig,
        frame: &Frame,
        weights: &[f64],
        test_name: &str,
        target_name: &str,
        purity: &dyn PurityFunction,
        rng: &mut R,
    ) -> Result<Option<Candidate>> {
        let ctx = SearchContext::new(*self, config, frame, weights, test_name, target_name)?;

        let candidate = match self {
            Search::Ignore => None,
            Search::NumericRandom => numeric::random(&ctx, purity, rng),
            Search::NumericBinary => numeric::binary(&ctx, purity),
            Search::Binary => binary::binary(&ctx, purity),
            Search::NominalFull => nominal::full(&ctx, purity)?,
            Search::NominalBinary => nominal::binary(&ctx, purity)?,
        };

        match &candidate {
            Some(candidate) => debug!(
                "{} on {}: score {} with {} groups",
                self.name(),
                test_name,
                candidate.score(),
                candidate.group_count()
            ),
            None => debug!("{} on {}: no candidate", self.name(), test_name),
        }
        Ok(candidate)
    }
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validated inputs shared by the strategies for one search call.
pub(crate) struct SearchContext<'a> {
    pub(crate) frame: &'a Frame,
    pub(crate) weights: &'a [f64],
    pub(crate) test_name: &'a str,
    pub(crate) test: VarIndex,
    pub(crate) target: VarIndex,
    pub(crate) target_levels: &'a [String],
    pub(crate) min_count: usize,
    missing_penalty: bool,
}

impl<'a> SearchContext<'a> {
    fn new(
        search: Search,
        config: &SearchConfig,
        frame: &'a Frame,
        weights: &'a [f64],
        test_name: &'a str,
        target_name: &str,
    ) -> Result<Self> {
        crate::ensure!(
            config.min_count > 0,
            SplitError::invalid_parameter("min_count", "0", "must be at least 1")
        );
        validate_weights(frame, weights)?;

        let test = frame.var_index(test_name)?;
        let target = frame.var_index(target_name)?;
        let target_levels = frame.levels(target)?;

        let kind = frame.var_kind(test);
        if !search.accepts(kind) {
            return Err(SplitError::variable_type(
                test_name,
                search.expected_kinds(),
                kind,
            ));
        }

        Ok(SearchContext {
            frame,
            weights,
            test_name,
            test,
            target,
            target_levels,
            min_count: config.min_count,
            missing_penalty: config.missing_penalty,
        })
    }

    /// Zeroed table with the given groups and one column per target level.
    pub(crate) fn table(&self, with_missing: bool, groups: &[&str]) -> DensityTable {
        DensityTable::empty(with_missing, groups, self.target_levels)
    }

    /// Number of real target levels.
    pub(crate) fn target_level_count(&self) -> usize {
        self.target_levels.len() - 1
    }

    /// Scales `score` by the share of weight whose test value is present,
    /// when the missing penalty is enabled.
    pub(crate) fn penalize(&self, score: f64, missing_weight: f64) -> f64 {
        if !self.missing_penalty {
            return score;
        }
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return score;
        }
        score * (total - missing_weight) / total
    }

    /// Total weight of the rows whose test value is missing.
    pub(crate) fn missing_weight(&self) -> f64 {
        (0..self.frame.row_count())
            .filter(|&row| self.frame.is_missing(row, self.test))
            .map(|row| self.weights[row])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::purity::PurityKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame() -> Frame {
        Frame::builder()
            .double("x", vec![1.0, 2.0, 3.0, 4.0])
            .nominal("c", ["a", "b", "a", "b"])
            .binary("f", vec![Some(true), Some(false), Some(true), None])
            .nominal("y", ["p", "p", "q", "q"])
            .build()
            .unwrap()
    }

    fn run(search: Search, config: &SearchConfig, test: &str, target: &str) -> Result<Option<Candidate>> {
        let df = frame();
        let weights = df.unit_weights();
        let mut rng = StdRng::seed_from_u64(7);
        search.compute_candidate(config, &df, &weights, test, target, &PurityKind::InfoGain, &mut rng)
    }

    #[test]
    fn test_accepts() {
        assert!(Search::NumericBinary.accepts(VarKind::Double));
        assert!(Search::NumericRandom.accepts(VarKind::Int));
        assert!(!Search::NumericBinary.accepts(VarKind::Nominal));
        assert!(Search::Binary.accepts(VarKind::Binary));
        assert!(!Search::Binary.accepts(VarKind::Double));
        assert!(Search::NominalFull.accepts(VarKind::Nominal));
        assert!(!Search::NominalBinary.accepts(VarKind::Binary));
        for kind in [VarKind::Double, VarKind::Int, VarKind::Nominal, VarKind::Binary] {
            assert!(Search::Ignore.accepts(kind));
        }
    }

    #[test]
    fn test_ignore_never_splits() {
        let config = SearchConfig::default();
        for test in ["x", "c", "f"] {
            assert!(run(Search::Ignore, &config, test, "y").unwrap().is_none());
        }
    }

    #[test]
    fn test_structural_errors() {
        let config = SearchConfig::default();
        assert!(matches!(
            run(Search::NumericBinary, &config, "nope", "y"),
            Err(SplitError::UnknownVariable { .. })
        ));
        assert!(matches!(
            run(Search::NumericBinary, &config, "x", "nope"),
            Err(SplitError::UnknownVariable { .. })
        ));
        assert!(matches!(
            run(Search::NumericBinary, &config, "c", "y"),
            Err(SplitError::VariableType { .. })
        ));
        assert!(matches!(
            run(Search::NominalFull, &config, "c", "x"),
            Err(SplitError::VariableType { .. })
        ));

        let zero = SearchConfig {
            min_count: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            run(Search::Ignore, &zero, "x", "y"),
            Err(SplitError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_weight_length_mismatch() {
        let df = frame();
        let mut rng = StdRng::seed_from_u64(7);
        let result = Search::Binary.compute_candidate(
            &SearchConfig::default(),
            &df,
            &[1.0, 1.0],
            "f",
            "y",
            &PurityKind::GiniGain,
            &mut rng,
        );
        assert!(matches!(result, Err(SplitError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_names() {
        assert_eq!(Search::ALL.len(), 6);
        assert_eq!(Search::NominalBinary.to_string(), "NominalBinary");
        let json = serde_json::to_string(&Search::NumericBinary).unwrap();
        assert_eq!(serde_json::from_str::<Search>(&json).unwrap(), Search::NumericBinary);
    }
}
