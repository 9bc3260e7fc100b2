//! Common test utilities for ctree-split integration tests.

#![allow(dead_code)]

use ctree_split::*;
use rand::prelude::*;

/// Seeded generator shared by the fixtures
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Frame with one informative numeric input, one noise input, a nominal
/// input, a boolean input and a two-class target.
///
/// The target is "yes" when `signal > 0.5`, so NumericBinary on `signal`
/// separates it perfectly.
pub fn create_classification_frame(num_samples: usize, seed: u64) -> Frame {
    let mut rng = rng(seed);

    let signal: Vec<f64> = (0..num_samples).map(|_| rng.gen_range(0.0..1.0)).collect();
    let noise: Vec<f64> = (0..num_samples).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let color: Vec<&str> = (0..num_samples)
        .map(|_| ["red", "green", "blue"][rng.gen_range(0..3)])
        .collect();
    let flag: Vec<Option<bool>> = (0..num_samples).map(|_| Some(rng.gen_bool(0.5))).collect();
    let target: Vec<&str> = signal
        .iter()
        .map(|&s| if s > 0.5 { "yes" } else { "no" })
        .collect();

    Frame::builder()
        .double("signal", signal)
        .double("noise", noise)
        .nominal("color", color)
        .binary("flag", flag)
        .nominal_with_levels("target", &["no", "yes"], target)
        .build()
        .expect("fixture frame is valid")
}

/// Random positive weights, one per row
pub fn random_weights(num_samples: usize, seed: u64) -> Vec<f64> {
    let mut rng = rng(seed);
    (0..num_samples).map(|_| rng.gen_range(0.1..2.0)).collect()
}

/// Compute a candidate with the given strategy, config and purity
pub fn compute(
    search: Search,
    config: &SearchConfig,
    frame: &Frame,
    weights: &[f64],
    test: &str,
    target: &str,
    purity: PurityKind,
) -> Result<Option<Candidate>> {
    let mut rng = rng(config.seed);
    search.compute_candidate(config, frame, weights, test, target, &purity, &mut rng)
}

/// Threshold of a numeric candidate
pub fn threshold_of(candidate: &Candidate) -> f64 {
    match &candidate.group_predicates()[0] {
        RowPredicate::NumLessEqual { value, .. } => *value,
        other => panic!("not a numeric candidate: {}", other),
    }
}

/// Rows matched by each group of a candidate
pub fn group_rows(candidate: &Candidate, frame: &Frame) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); candidate.group_count()];
    for row in 0..frame.row_count() {
        if let Some(group) = candidate.group_of(frame, row) {
            groups[group].push(row);
        }
    }
    groups
}
