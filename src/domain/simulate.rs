//! Crossover trade simulation.
//!
//! Replays a single-position golden-cross/death-cross policy over an index
//! window of one price series, given two precomputed SMA columns. Whole-share
//! sizing, one open position at a time, forced liquidation on the last day of
//! the window.

use super::sma::SmaSeries;

/// Final cash and trade count for one (short, long) pair over one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOutcome {
    pub final_capital: f64,
    pub trades: u32,
}

/// Run the crossover policy over `closes[start_idx..=end_idx]`.
///
/// The window is normalized first: `end_idx` is clamped to the last index,
/// a collapsed window (`start_idx >= end_idx`) trades nothing, and
/// `start_idx` is forced to at least 1 because day `i` compares against the
/// SMA difference at `i - 1`.
///
/// Rules, per day `i`:
/// - skip the day when either SMA difference operand is still warming up;
/// - flat + `d_prev < 0 && d_now > 0`: buy `floor(cash / close)` shares,
///   except never on the first simulated day (both inequalities strict, so a
///   cross touching zero exactly never trades);
/// - holding + `d_prev > 0 && d_now < 0`: sell everything.
///
/// Any shares still held after the loop are sold at `closes[end_idx]`, which
/// counts as one more trade.
pub fn simulate_range(
    closes: &[f64],
    fast: &SmaSeries,
    slow: &SmaSeries,
    start_idx: usize,
    end_idx: usize,
    initial_capital: f64,
) -> SimulationOutcome {
    let no_trades = SimulationOutcome {
        final_capital: initial_capital,
        trades: 0,
    };

    let n = closes.len();
    if n == 0 {
        return no_trades;
    }

    let end_idx = end_idx.min(n - 1);
    if start_idx >= end_idx {
        return no_trades;
    }
    let start_idx = start_idx.max(1);

    let mut cash = initial_capital;
    let mut shares: i64 = 0;
    let mut trades: u32 = 0;

    for i in start_idx..=end_idx {
        let (d_prev, d_now) = match (fast.get(i - 1), slow.get(i - 1), fast.get(i), slow.get(i)) {
            (Some(fp), Some(sp), Some(fc), Some(sc)) => (fp - sp, fc - sc),
            _ => continue,
        };

        let first_day = i == start_idx;

        if !first_day && shares == 0 && d_prev < 0.0 && d_now > 0.0 {
            let affordable = (cash / closes[i]).floor() as i64;
            if affordable > 0 {
                shares += affordable;
                cash -= affordable as f64 * closes[i];
                trades += 1;
            }
        } else if shares > 0 && d_prev > 0.0 && d_now < 0.0 {
            cash += shares as f64 * closes[i];
            shares = 0;
            trades += 1;
        }
    }

    // Forced liquidation at the window's last close.
    if shares > 0 {
        cash += shares as f64 * closes[end_idx];
        trades += 1;
    }

    SimulationOutcome {
        final_capital: cash,
        trades,
    }
}
