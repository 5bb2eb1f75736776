//! Daily closing-price series for one symbol.

use chrono::{Datelike, NaiveDate};

/// An ordered run of daily closes with a parallel date column.
///
/// Invariant: `dates.len() == closes.len()`. Built once per symbol by the
/// data adapter and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(symbol: String, dates: Vec<NaiveDate>, closes: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), closes.len());
        Self {
            symbol,
            dates,
            closes,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// First and last index whose date falls in `year`, or `None` when the
    /// series has no rows for that year.
    pub fn year_window(&self, year: i32) -> Option<(usize, usize)> {
        let mut start = None;
        let mut end = None;
        for (i, date) in self.dates.iter().enumerate() {
            if date.year() == year {
                if start.is_none() {
                    start = Some(i);
                }
                end = Some(i);
            }
        }
        Some((start?, end?))
    }

    /// The whole series as an index window. Empty series yields `(0, 0)`.
    pub fn full_window(&self) -> (usize, usize) {
        (0, self.len().saturating_sub(1))
    }
}
