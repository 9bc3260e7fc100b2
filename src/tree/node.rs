//! Node-level split selection.
//!
//! [`NodeSearch`] evaluates every input variable of a node with the
//! strategy mapped to its kind and keeps the best candidate.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::purity::{improves, PurityFunction};
use super::search::Search;
use crate::config::SearchConfig;
use crate::core::error::Result;
use crate::core::types::VarKind;
use crate::dataset::Frame;

/// Strategy used for each variable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMap {
    /// Strategy for binary variables
    pub binary: Search,
    /// Strategy for integer variables
    pub int: Search,
    /// Strategy for double variables
    pub double: Search,
    /// Strategy for nominal variables
    pub nominal: Search,
}

impl Default for SearchMap {
    fn default() -> Self {
        SearchMap {
            binary: Search::Binary,
            int: Search::NumericBinary,
            double: Search::NumericBinary,
            nominal: Search::NominalBinary,
        }
    }
}

impl SearchMap {
    /// Strategy mapped to `kind`.
    pub fn get(&self, kind: VarKind) -> Search {
        match kind {
            VarKind::Binary => self.binary,
            VarKind::Int => self.int,
            VarKind::Double => self.double,
            VarKind::Nominal => self.nominal,
        }
    }

    /// Returns a copy with `kind` mapped to `search`.
    pub fn with(mut self, kind: VarKind, search: Search) -> Self {
        match kind {
            VarKind::Binary => self.binary = search,
            VarKind::Int => self.int = search,
            VarKind::Double => self.double = search,
            VarKind::Nominal => self.nominal = search,
        }
        self
    }

    /// Kinds whose mapped strategy cannot handle them.
    pub fn mismatched_kinds(&self) -> Vec<VarKind> {
        [VarKind::Binary, VarKind::Int, VarKind::Double, VarKind::Nominal]
            .into_iter()
            .filter(|&kind| !self.get(kind).accepts(kind))
            .collect()
    }
}

/// Outcome of a node search.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSearchResult {
    /// Best candidate over all inputs, if any input produced one
    pub best: Option<Candidate>,
    /// Inputs that produced no candidate, in input order
    pub exhausted: Vec<String>,
    /// Number of inputs evaluated
    pub evaluated: usize,
}

/// Picks the best split of a node over a set of input variables.
#[derive(Debug)]
pub struct NodeSearch<'a> {
    config: &'a SearchConfig,
    purity: &'a dyn PurityFunction,
}

impl<'a> NodeSearch<'a> {
    /// Search driven by `config`, scoring with its purity function.
    pub fn new(config: &'a SearchConfig) -> Self {
        NodeSearch {
            config,
            purity: &config.purity,
        }
    }

    /// Search driven by `config`, scoring with a custom purity function.
    pub fn with_purity(config: &'a SearchConfig, purity: &'a dyn PurityFunction) -> Self {
        NodeSearch { config, purity }
    }

    /// Evaluates every input except the target and returns the best
    /// candidate; ties go to the earliest input and NaN scores never win.
    ///
    /// Each input draws from its own generator seeded from the configured
    /// seed and the input position, so parallel and sequential evaluation
    /// agree.
    pub fn best_candidate<S: AsRef<str> + Sync>(
        &self,
        frame: &Frame,
        weights: &[f64],
        inputs: &[S],
        target: &str,
    ) -> Result<NodeSearchResult> {
        let inputs: Vec<&str> = inputs
            .iter()
            .map(AsRef::as_ref)
            .filter(|&name| name != target)
            .collect();

        let evaluate = |(position, name): (usize, &&str)| -> Result<Option<Candidate>> {
            let var = frame.var_index(name)?;
            let search = self.config.search_map.get(frame.var_kind(var));
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(position as u64));
            search.compute_candidate(self.config, frame, weights, name, target, self.purity, &mut rng)
        };

        let outcomes: Vec<Option<Candidate>> = if self.config.parallel {
            inputs
                .par_iter()
                .enumerate()
                .map(evaluate)
                .collect::<Result<_>>()?
        } else {
            inputs
                .iter()
                .enumerate()
                .map(evaluate)
                .collect::<Result<_>>()?
        };

        let mut best: Option<Candidate> = None;
        let mut exhausted = Vec::new();
        for (name, outcome) in inputs.iter().zip(outcomes) {
            match outcome {
                Some(candidate) => {
                    if candidate.score().is_nan() {
                        warn!("candidate on {} has a NaN score", name);
                    }
                    if improves(candidate.score(), best.as_ref().map(Candidate::score)) {
                        best = Some(candidate);
                    }
                }
                None => exhausted.push(name.to_string()),
            }
        }

        match &best {
            Some(candidate) => debug!(
                "best split on {} with score {} over {} inputs",
                candidate.test_name(),
                candidate.score(),
                inputs.len()
            ),
            None => debug!("no split over {} inputs", inputs.len()),
        }

        Ok(NodeSearchResult {
            best,
            exhausted,
            evaluated: inputs.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SplitError;

    fn frame() -> Frame {
        Frame::builder()
            .double("noise", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .double("signal", vec![1.0, 6.0, 2.0, 5.0, 3.0, 4.0])
            .binary("flag", vec![Some(true); 6])
            .nominal("y", ["a", "b", "a", "b", "a", "b"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_search_map_defaults() {
        let map = SearchMap::default();
        assert_eq!(map.get(VarKind::Binary), Search::Binary);
        assert_eq!(map.get(VarKind::Int), Search::NumericBinary);
        assert_eq!(map.get(VarKind::Double), Search::NumericBinary);
        assert_eq!(map.get(VarKind::Nominal), Search::NominalBinary);
        assert!(map.mismatched_kinds().is_empty());

        let map = map.with(VarKind::Nominal, Search::NumericBinary);
        assert_eq!(map.mismatched_kinds(), vec![VarKind::Nominal]);
    }

    #[test]
    fn test_best_candidate() {
        let df = frame();
        let config = SearchConfig::default();
        let result = NodeSearch::new(&config)
            .best_candidate(&df, &df.unit_weights(), &["noise", "signal", "flag", "y"], "y")
            .unwrap();
        let best = result.best.unwrap();
        assert_eq!(best.test_name(), "signal");
        assert_eq!(result.exhausted, vec!["flag".to_string()]);
        assert_eq!(result.evaluated, 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let df = frame();
        let inputs = ["noise", "signal", "flag"];
        let sequential = SearchConfig {
            parallel: false,
            ..SearchConfig::default()
        };
        let parallel = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let a = NodeSearch::new(&sequential)
            .best_candidate(&df, &df.unit_weights(), &inputs, "y")
            .unwrap();
        let b = NodeSearch::new(&parallel)
            .best_candidate(&df, &df.unit_weights(), &inputs, "y")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_input_fails() {
        let df = frame();
        let config = SearchConfig::default();
        let err = NodeSearch::new(&config)
            .best_candidate(&df, &df.unit_weights(), &["nope"], "y")
            .unwrap_err();
        assert!(matches!(err, SplitError::UnknownVariable { .. }));
    }
}
