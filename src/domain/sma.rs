//! Simple moving average over a close-price slice.
//!
//! Positions without enough trailing history hold `None` rather than a NaN
//! sentinel, so callers branch on the type instead of relying on float
//! comparison semantics.

/// One SMA column: `values[i]` is the mean of the `window` closes ending at
/// `i`, or `None` for the first `window - 1` positions. A window of 0 or one
/// longer than the series produces all-`None`, which is a legitimate
/// "no signal available" result, not an error.
#[derive(Debug, Clone)]
pub struct SmaSeries {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

impl SmaSeries {
    /// Value at `i`; `None` for warm-up or out-of-range indices.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().flatten()
    }
}

/// Compute the SMA with a running sum: one pass, O(N) for any window length.
pub fn calc_sma(closes: &[f64], window: usize) -> SmaSeries {
    let n = closes.len();
    let mut values: Vec<Option<f64>> = vec![None; n];

    if window < 1 || window > n {
        return SmaSeries { window, values };
    }

    let mut sum: f64 = closes[..window].iter().sum();
    values[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum += closes[i] - closes[i - window];
        values[i] = Some(sum / window as f64);
    }

    SmaSeries { window, values }
}
