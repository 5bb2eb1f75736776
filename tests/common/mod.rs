#![allow(dead_code)]

use chrono::NaiveDate;
use crossgrid::domain::error::CrossgridError;
use crossgrid::domain::grid::OptimizerConfig;
use crossgrid::domain::price_series::PriceSeries;
use crossgrid::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.data.insert(symbol.to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(&self, symbol: &str) -> Result<PriceSeries, CrossgridError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CrossgridError::Data {
                reason: reason.clone(),
            });
        }
        self.data
            .get(symbol)
            .cloned()
            .ok_or_else(|| CrossgridError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }

    fn list_symbols(&self) -> Result<Vec<String>, CrossgridError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Series of consecutive days starting 2024-01-01.
pub fn make_series(symbol: &str, closes: Vec<f64>) -> PriceSeries {
    let dates = (0..closes.len())
        .map(|i| date(2024, 1, 1) + chrono::Days::new(i as u64))
        .collect();
    PriceSeries::new(symbol.to_string(), dates, closes)
}

pub fn small_config(max_window: usize, top_n: usize) -> OptimizerConfig {
    OptimizerConfig {
        max_window,
        top_n,
        ..OptimizerConfig::default()
    }
}
