//! Searches on nominal variables.
//!
//! Level tables have one row per catalog level of the test variable and one
//! column per target level; rows missing either value are left out. The
//! minimum count precondition is checked on row counts, scores use weights.

use log::trace;
use std::collections::BTreeSet;

use super::SearchContext;
use crate::core::constants::NOMINAL_BINARY_GROUP_LABELS;
use crate::core::error::Result;
use crate::tree::candidate::Candidate;
use crate::tree::density::DensityTable;
use crate::tree::predicate::RowPredicate;
use crate::tree::purity::{improves, PurityFunction};

/// Row counts and weights per (test level, target level).
fn level_tables(ctx: &SearchContext<'_>) -> Result<Option<(DensityTable, DensityTable)>> {
    let counts = DensityTable::from_levels(false, ctx.frame, ctx.test, ctx.target, None)?;
    if !counts.has_cols_with_minimum_count(ctx.min_count as f64, 2) {
        return Ok(None);
    }
    let weighted = DensityTable::from_levels(false, ctx.frame, ctx.test, ctx.target, Some(ctx.weights))?;
    Ok(Some((counts, weighted)))
}

/// One group per level of the test variable.
pub(super) fn full(ctx: &SearchContext<'_>, purity: &dyn PurityFunction) -> Result<Option<Candidate>> {
    let Some((_, weighted)) = level_tables(ctx)? else {
        return Ok(None);
    };

    let score = purity.compute(&weighted);
    let groups = weighted
        .row_labels()
        .iter()
        .map(|level| RowPredicate::nom_equal(ctx.test_name, level.as_str()))
        .collect();
    Ok(Some(Candidate::new(score, ctx.test_name, groups)))
}

/// Best two-way partition of the levels of the test variable.
///
/// With two target levels the levels are ordered by their weight on the
/// first target level and only the prefixes of that order are scored. With
/// more target levels each level is scored against all the others.
pub(super) fn binary(ctx: &SearchContext<'_>, purity: &dyn PurityFunction) -> Result<Option<Candidate>> {
    let Some((counts, weighted)) = level_tables(ctx)? else {
        return Ok(None);
    };

    let row_counts = counts.row_totals();
    let col_totals = weighted.col_totals();
    if ctx.target_level_count() == 2 {
        Ok(ordered_prefix_split(ctx, purity, &weighted, &row_counts, &col_totals))
    } else {
        Ok(one_versus_rest_split(ctx, purity, &weighted, &row_counts, &col_totals))
    }
}

fn ordered_prefix_split(
    ctx: &SearchContext<'_>,
    purity: &dyn PurityFunction,
    weighted: &DensityTable,
    row_counts: &[f64],
    col_totals: &[f64],
) -> Option<Candidate> {
    let min_count = ctx.min_count as f64;
    let total_rows: f64 = row_counts.iter().sum();
    let cols = weighted.cols();

    let mut table = ctx.table(false, &NOMINAL_BINARY_GROUP_LABELS);
    for (col, &total) in col_totals.iter().enumerate() {
        table.increment(1, col, total);
    }

    let mut order: Vec<usize> = (0..weighted.rows()).collect();
    order.sort_by(|&a, &b| weighted.get(b, 0).total_cmp(&weighted.get(a, 0)));

    let mut test_levels = BTreeSet::new();
    let mut left_rows = 0.0;
    let mut best: Option<(f64, BTreeSet<String>)> = None;

    for &level in &order {
        test_levels.insert(weighted.row_labels()[level].clone());
        for col in 0..cols {
            let w = weighted.get(level, col);
            table.increment(0, col, w);
            table.increment(1, col, -w);
        }

        left_rows += row_counts[level];
        if left_rows < min_count || total_rows - left_rows < min_count {
            continue;
        }

        let score = purity.compute(&table);
        trace!("{} prefix {:?} scored {}", ctx.test_name, test_levels, score);
        if improves(score, best.as_ref().map(|(s, _)| *s)) {
            best = Some((score, test_levels.clone()));
        }
    }

    best.map(|(score, levels)| {
        Candidate::new(
            score,
            ctx.test_name,
            vec![
                RowPredicate::nom_in_set(ctx.test_name, levels.clone()),
                RowPredicate::nom_not_in_set(ctx.test_name, levels),
            ],
        )
    })
}

fn one_versus_rest_split(
    ctx: &SearchContext<'_>,
    purity: &dyn PurityFunction,
    weighted: &DensityTable,
    row_counts: &[f64],
    col_totals: &[f64],
) -> Option<Candidate> {
    let min_count = ctx.min_count as f64;
    let mut best: Option<(f64, usize)> = None;

    for level in 0..weighted.rows() {
        if row_counts[level] < min_count {
            continue;
        }

        let mut table = ctx.table(false, &NOMINAL_BINARY_GROUP_LABELS);
        for (col, &total) in col_totals.iter().enumerate() {
            let w = weighted.get(level, col);
            table.increment(0, col, w);
            table.increment(1, col, total - w);
        }

        let score = purity.compute(&table);
        trace!("{} level {} vs rest scored {}", ctx.test_name, weighted.row_labels()[level], score);
        if improves(score, best.map(|(s, _)| s)) {
            best = Some((score, level));
        }
    }

    best.map(|(score, level)| {
        let label = weighted.row_labels()[level].as_str();
        Candidate::new(
            score,
            ctx.test_name,
            vec![
                RowPredicate::nom_equal(ctx.test_name, label),
                RowPredicate::nom_not_equal(ctx.test_name, label),
            ],
        )
    })
}

#[cfg(test)]
mod tests {
    use crate::config::SearchConfig;
    use crate::dataset::Frame;
    use crate::tree::purity::PurityKind;
    use crate::tree::search::Search;
    use crate::tree::{Candidate, RowPredicate};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn search(search: Search, df: &Frame, config: &SearchConfig) -> Option<Candidate> {
        let mut rng = StdRng::seed_from_u64(5);
        search
            .compute_candidate(config, df, &df.unit_weights(), "c", "y", &PurityKind::InfoGain, &mut rng)
            .unwrap()
    }

    fn set(levels: &[&str]) -> BTreeSet<String> {
        levels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_one_group_per_level() {
        let df = Frame::builder()
            .nominal("c", ["a", "b", "c", "a", "?"])
            .nominal("y", ["p", "q", "q", "p", "p"])
            .build()
            .unwrap();
        let candidate = search(Search::NominalFull, &df, &SearchConfig::default()).unwrap();
        assert_eq!(
            candidate.group_predicates(),
            &[
                RowPredicate::nom_equal("c", "a"),
                RowPredicate::nom_equal("c", "b"),
                RowPredicate::nom_equal("c", "c"),
            ]
        );
        assert_abs_diff_eq!(candidate.score(), 1.0, epsilon = 1e-12);
        assert_eq!(candidate.group_of(&df, 4), None);
    }

    #[test]
    fn test_full_needs_two_populated_levels() {
        let df = Frame::builder()
            .nominal("c", ["a", "a", "a", "b"])
            .nominal("y", ["p", "q", "q", "p"])
            .build()
            .unwrap();
        let config = SearchConfig {
            min_count: 2,
            ..SearchConfig::default()
        };
        assert!(search(Search::NominalFull, &df, &config).is_none());
        assert!(search(Search::NominalBinary, &df, &config).is_none());
    }

    #[test]
    fn test_binary_two_classes_groups_levels() {
        let df = Frame::builder()
            .nominal("c", ["a", "b", "c", "d", "a", "b", "c", "d"])
            .nominal("y", ["p", "q", "p", "q", "p", "q", "p", "q"])
            .build()
            .unwrap();
        let candidate = search(Search::NominalBinary, &df, &SearchConfig::default()).unwrap();
        assert_abs_diff_eq!(candidate.score(), 1.0, epsilon = 1e-12);
        assert_eq!(
            candidate.group_predicates(),
            &[
                RowPredicate::nom_in_set("c", set(&["a", "c"])),
                RowPredicate::nom_not_in_set("c", set(&["a", "c"])),
            ]
        );
    }

    #[test]
    fn test_binary_many_classes_one_versus_rest() {
        let df = Frame::builder()
            .nominal("c", ["a", "a", "b", "b", "c", "c"])
            .nominal("y", ["p", "p", "q", "r", "q", "r"])
            .build()
            .unwrap();
        let candidate = search(Search::NominalBinary, &df, &SearchConfig::default()).unwrap();
        assert_eq!(
            candidate.group_predicates(),
            &[RowPredicate::nom_equal("c", "a"), RowPredicate::nom_not_equal("c", "a")]
        );
        for row in 0..6 {
            let expected = if row < 2 { 0 } else { 1 };
            assert_eq!(candidate.group_of(&df, row), Some(expected));
        }
    }
}
