//! Two-way split on a boolean variable.

use super::SearchContext;
use crate::core::constants::{BINARY_GROUP_LABELS, MISSING_LEVEL};
use crate::tree::candidate::Candidate;
use crate::tree::predicate::RowPredicate;
use crate::tree::purity::PurityFunction;

pub(super) fn binary(ctx: &SearchContext<'_>, purity: &dyn PurityFunction) -> Option<Candidate> {
    let frame = ctx.frame;
    let mut counts = ctx.table(false, &BINARY_GROUP_LABELS);
    let mut table = ctx.table(false, &BINARY_GROUP_LABELS);

    for row in 0..frame.row_count() {
        let Some(value) = frame.get_binary(row, ctx.test) else {
            continue;
        };
        let level = frame.get_level(row, ctx.target);
        if level == MISSING_LEVEL {
            continue;
        }
        let group = if value { 0 } else { 1 };
        counts.increment(group, level - 1, 1.0);
        table.increment(group, level - 1, ctx.weights[row]);
    }

    if !counts.has_cols_with_minimum_count(ctx.min_count as f64, 2) {
        return None;
    }

    let score = ctx.penalize(purity.compute(&table), ctx.missing_weight());
    Some(Candidate::new(
        score,
        ctx.test_name,
        vec![
            RowPredicate::bin_equal(ctx.test_name, true),
            RowPredicate::bin_equal(ctx.test_name, false),
        ],
    ))
}
