//! Exhaustive (short, long) window grid search for one symbol.

use super::price_series::PriceSeries;
use super::simulate::{SimulationOutcome, simulate_range};
use super::sma::{SmaSeries, calc_sma};

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;
pub const DEFAULT_MAX_WINDOW: usize = 256;
pub const DEFAULT_TOP_N: usize = 20;

/// Parameters for one optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub initial_capital: f64,
    pub max_window: usize,
    pub top_n: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            max_window: DEFAULT_MAX_WINDOW,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Outcome of one evaluated (short, long) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridResult {
    pub short: usize,
    pub long: usize,
    pub final_capital: f64,
    pub trades: u32,
}

impl GridResult {
    /// Percentage return relative to `initial_capital`.
    pub fn return_pct(&self, initial_capital: f64) -> f64 {
        (self.final_capital / initial_capital - 1.0) * 100.0
    }
}

/// Best pair seen during the search (strictly greatest final capital,
/// first seen wins ties).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPair {
    pub short: usize,
    pub long: usize,
    pub final_capital: f64,
}

/// Full grid result set plus the incremental best-pair summary.
#[derive(Debug, Clone)]
pub struct GridOutcome {
    pub results: Vec<GridResult>,
    pub best: Option<BestPair>,
}

/// Per-symbol memo of SMA columns for every window in `1..=max_window`.
///
/// Built once before the pair loop so each column is computed a single time
/// instead of once per pair. Scoped to one symbol's search; different symbols
/// have different closes, so nothing is shared across runs.
pub struct SmaCache {
    columns: Vec<SmaSeries>,
}

impl SmaCache {
    pub fn build(closes: &[f64], max_window: usize) -> Self {
        let columns = (1..=max_window).map(|n| calc_sma(closes, n)).collect();
        SmaCache { columns }
    }

    /// Column for `window`. Panics on a window outside `1..=max_window`;
    /// the grid loop only asks for windows it precomputed.
    pub fn get(&self, window: usize) -> &SmaSeries {
        &self.columns[window - 1]
    }
}

/// Evaluate every ordered pair `(s, l)` in `1..=max_window²` over the index
/// window `[start_idx, end_idx]`. Pairs with `s == l` or `s > l` are
/// included; they simply produce fewer (or no) crossings.
///
/// An empty price series yields an empty result set with no best pair.
pub fn grid_search(
    series: &PriceSeries,
    start_idx: usize,
    end_idx: usize,
    config: &OptimizerConfig,
) -> GridOutcome {
    if series.is_empty() {
        return GridOutcome {
            results: Vec::new(),
            best: None,
        };
    }

    let cache = SmaCache::build(&series.closes, config.max_window);

    let mut results = Vec::with_capacity(config.max_window * config.max_window);
    let mut best: Option<BestPair> = None;

    for s in 1..=config.max_window {
        for l in 1..=config.max_window {
            let SimulationOutcome {
                final_capital,
                trades,
            } = simulate_range(
                &series.closes,
                cache.get(s),
                cache.get(l),
                start_idx,
                end_idx,
                config.initial_capital,
            );

            results.push(GridResult {
                short: s,
                long: l,
                final_capital,
                trades,
            });

            if best.is_none_or(|b| final_capital > b.final_capital) {
                best = Some(BestPair {
                    short: s,
                    long: l,
                    final_capital,
                });
            }
        }
    }

    GridOutcome { results, best }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn series(closes: Vec<f64>) -> PriceSeries {
        let dates = (0..closes.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
            .collect();
        PriceSeries::new("TEST".into(), dates, closes)
    }

    fn small_config(max_window: usize) -> OptimizerConfig {
        OptimizerConfig {
            max_window,
            ..OptimizerConfig::default()
        }
    }

    #[test]
    fn grid_is_exhaustive_over_all_pairs() {
        let s = series(vec![20.0, 10.0, 10.0, 9.0, 30.0, 10.0, 5.0]);
        let outcome = grid_search(&s, 1, 6, &small_config(5));

        assert_eq!(outcome.results.len(), 25);
        let pairs: HashSet<(usize, usize)> =
            outcome.results.iter().map(|r| (r.short, r.long)).collect();
        assert_eq!(pairs.len(), 25);
        for s in 1..=5 {
            for l in 1..=5 {
                assert!(pairs.contains(&(s, l)));
            }
        }
    }

    #[test]
    fn best_pair_matches_maximum_result() {
        let s = series(vec![20.0, 10.0, 10.0, 9.0, 30.0, 10.0, 5.0]);
        let outcome = grid_search(&s, 1, 6, &small_config(4));

        let best = outcome.best.unwrap();
        let max = outcome
            .results
            .iter()
            .map(|r| r.final_capital)
            .fold(f64::MIN, f64::max);
        assert_relative_eq!(best.final_capital, max);
    }

    #[test]
    fn best_pair_first_seen_wins_ties() {
        // Flat prices: every pair ends at initial capital, so the first
        // evaluated pair (1, 1) must be reported.
        let s = series(vec![50.0; 10]);
        let outcome = grid_search(&s, 1, 9, &small_config(3));

        let best = outcome.best.unwrap();
        assert_eq!((best.short, best.long), (1, 1));
        assert_relative_eq!(best.final_capital, DEFAULT_INITIAL_CAPITAL);
    }

    #[test]
    fn empty_series_yields_empty_outcome() {
        let s = series(vec![]);
        let outcome = grid_search(&s, 0, 10, &small_config(8));
        assert!(outcome.results.is_empty());
        assert!(outcome.best.is_none());
    }

    #[test]
    fn windows_beyond_history_still_produce_results() {
        // max_window far exceeds the series length: those SMA columns are
        // all-None and their simulations degenerate to zero trades.
        let s = series(vec![10.0, 20.0, 30.0]);
        let outcome = grid_search(&s, 0, 2, &small_config(6));

        assert_eq!(outcome.results.len(), 36);
        for r in &outcome.results {
            if r.short > 3 || r.long > 3 {
                assert_eq!(r.trades, 0);
                assert_relative_eq!(r.final_capital, DEFAULT_INITIAL_CAPITAL);
            }
        }
    }

    #[test]
    fn return_pct_is_relative_to_initial() {
        let r = GridResult {
            short: 1,
            long: 2,
            final_capital: 12_500.0,
            trades: 2,
        };
        assert_relative_eq!(r.return_pct(10_000.0), 25.0);
    }
}
