//! Threshold searches on numeric variables.
//!
//! Both searches build a two-row table (`<= t`, `> t`) whose columns keep
//! the missing-target slot, so rows with an unknown target still count as
//! weight of their group.

use log::trace;
use rand::Rng;

use super::SearchContext;
use crate::core::constants::NUMERIC_GROUP_LABELS;
use crate::core::types::RowIndex;
use crate::tree::candidate::Candidate;
use crate::tree::predicate::RowPredicate;
use crate::tree::purity::{improves, PurityFunction};

fn threshold_candidate(ctx: &SearchContext<'_>, score: f64, threshold: f64) -> Candidate {
    Candidate::new(
        score,
        ctx.test_name,
        vec![
            RowPredicate::num_less_equal(ctx.test_name, threshold),
            RowPredicate::num_greater(ctx.test_name, threshold),
        ],
    )
}

/// Threshold strictly below `next` and not below `current`.
///
/// The midpoint of two adjacent floats can round up to `next`, and is
/// infinite when `next` is; `current` routes the same rows in both cases.
fn midpoint(current: f64, next: f64) -> f64 {
    let mid = current + (next - current) / 2.0;
    if mid > current && mid < next {
        mid
    } else {
        current
    }
}

/// Splits at the value of a uniformly drawn non-missing row.
pub(super) fn random<R: Rng + ?Sized>(
    ctx: &SearchContext<'_>,
    purity: &dyn PurityFunction,
    rng: &mut R,
) -> Option<Candidate> {
    let frame = ctx.frame;
    let present: Vec<RowIndex> = (0..frame.row_count())
        .filter(|&row| !frame.is_missing(row, ctx.test))
        .collect();
    if present.is_empty() {
        return None;
    }

    let threshold = frame.get_double(present[rng.gen_range(0..present.len())], ctx.test);

    let mut table = ctx.table(true, &NUMERIC_GROUP_LABELS);
    let mut missing = 0.0;
    for row in 0..frame.row_count() {
        if frame.is_missing(row, ctx.test) {
            missing += ctx.weights[row];
            continue;
        }
        let group = if frame.get_double(row, ctx.test) <= threshold { 0 } else { 1 };
        table.increment(group, frame.get_level(row, ctx.target), ctx.weights[row]);
    }

    let score = ctx.penalize(purity.compute(&table), missing);
    trace!("random threshold {} on {} scored {}", threshold, ctx.test_name, score);
    Some(threshold_candidate(ctx, score, threshold))
}

/// Sweeps every boundary between consecutive distinct sorted values and
/// keeps the best scoring midpoint.
pub(super) fn binary(ctx: &SearchContext<'_>, purity: &dyn PurityFunction) -> Option<Candidate> {
    let frame = ctx.frame;
    let mut table = ctx.table(true, &NUMERIC_GROUP_LABELS);

    let mut rows: Vec<RowIndex> = Vec::with_capacity(frame.row_count());
    let mut missing = 0.0;
    for row in 0..frame.row_count() {
        if frame.is_missing(row, ctx.test) {
            missing += ctx.weights[row];
            continue;
        }
        rows.push(row);
        table.increment(1, frame.get_level(row, ctx.target), ctx.weights[row]);
    }

    let values: Vec<f64> = rows.iter().map(|&row| frame.get_double(row, ctx.test)).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let len = order.len();
    let min_count = ctx.min_count;
    let mut best: Option<(f64, f64)> = None;

    for i in 0..len {
        let row = rows[order[i]];
        let level = frame.get_level(row, ctx.target);
        let w = ctx.weights[row];
        table.increment(0, level, w);
        table.increment(1, level, -w);

        if i < min_count || i + min_count >= len {
            continue;
        }
        let (current, next) = (values[order[i]], values[order[i + 1]]);
        if current >= next {
            continue;
        }

        let score = purity.compute(&table);
        trace!("{} boundary {} < {} scored {}", ctx.test_name, current, next, score);
        if improves(score, best.map(|(s, _)| s)) {
            best = Some((score, midpoint(current, next)));
        }
    }

    best.map(|(score, threshold)| threshold_candidate(ctx, ctx.penalize(score, missing), threshold))
}
