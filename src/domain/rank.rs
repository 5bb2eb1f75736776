//! Ranking of grid results.

use std::cmp::Ordering;

use super::grid::GridResult;

/// The ordered top-N slice of one symbol's grid, ready for the reporter.
#[derive(Debug, Clone)]
pub struct RankedReport {
    pub entries: Vec<GridResult>,
}

/// Ranking order, highest rank first:
/// 1. final capital, descending;
/// 2. window spread `|short - long|`, descending;
/// 3. short window, ascending;
/// 4. long window, ascending.
///
/// Keys 3 and 4 alone distinguish any two distinct pairs, so this is a total
/// order on the grid.
pub fn compare_results(a: &GridResult, b: &GridResult) -> Ordering {
    b.final_capital
        .partial_cmp(&a.final_capital)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.short.abs_diff(b.long).cmp(&a.short.abs_diff(a.long)))
        .then_with(|| a.short.cmp(&b.short))
        .then_with(|| a.long.cmp(&b.long))
}

/// Sort the full grid under [`compare_results`] and keep the top `top_n`.
/// A set smaller than `top_n` is returned whole.
pub fn rank_results(mut results: Vec<GridResult>, top_n: usize) -> RankedReport {
    results.sort_by(compare_results);
    results.truncate(top_n);
    RankedReport { entries: results }
}
