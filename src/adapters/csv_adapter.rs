//! Wide-format CSV price file adapter.
//!
//! Expects a header `Date,SYM1,SYM2,...` and one row per trading day with a
//! close for every symbol. Malformed rows (wrong field count, unparseable
//! number or date) are skipped with a stderr diagnostic; they never abort
//! the load.

use crate::domain::error::CrossgridError;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::Path;

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

pub struct CsvAdapter {
    symbols: Vec<String>,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<f64>>,
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(field, fmt).ok())
}

impl CsvAdapter {
    /// Load the whole price table once; per-symbol fetches slice out columns.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CrossgridError> {
        let path = path.as_ref();
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| CrossgridError::Data {
                reason: format!("failed to open {}: {}", path.display(), e),
            })?;

        let headers = rdr.headers().map_err(|e| CrossgridError::Data {
            reason: format!("failed to read header of {}: {}", path.display(), e),
        })?;

        if headers.len() < 2 {
            return Err(CrossgridError::Data {
                reason: format!(
                    "{}: header needs a date column and at least one symbol",
                    path.display()
                ),
            });
        }

        let symbols: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let width = headers.len();

        let mut dates = Vec::new();
        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CrossgridError::Data {
                reason: format!("CSV read error in {}: {}", path.display(), e),
            })?;

            if record.iter().all(|f| f.is_empty()) {
                continue;
            }
            if record.len() != width {
                eprintln!(
                    "warning: skipping row with {} fields (expected {}): {:?}",
                    record.len(),
                    width,
                    record
                );
                continue;
            }

            let date_field = &record[0];
            let Some(date) = parse_date(date_field) else {
                eprintln!("warning: skipping row with unparseable date {:?}", date_field);
                continue;
            };

            let mut closes = Vec::with_capacity(symbols.len());
            let mut ok = true;
            for field in record.iter().skip(1) {
                match field.parse::<f64>() {
                    Ok(v) => closes.push(v),
                    Err(_) => {
                        eprintln!(
                            "warning: skipping row {}: bad price value {:?}",
                            date_field, field
                        );
                        ok = false;
                        break;
                    }
                }
            }
            if !ok {
                continue;
            }

            dates.push(date);
            rows.push(closes);
        }

        Ok(Self {
            symbols,
            dates,
            rows,
        })
    }

    pub fn day_count(&self) -> usize {
        self.dates.len()
    }

    fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols
            .iter()
            .position(|s| s.eq_ignore_ascii_case(symbol))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(&self, symbol: &str) -> Result<PriceSeries, CrossgridError> {
        let idx = self
            .symbol_index(symbol)
            .ok_or_else(|| CrossgridError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;

        if self.rows.is_empty() {
            return Err(CrossgridError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let closes: Vec<f64> = self.rows.iter().map(|row| row[idx]).collect();
        Ok(PriceSeries::new(
            self.symbols[idx].clone(),
            self.dates.clone(),
            closes,
        ))
    }

    fn list_symbols(&self) -> Result<Vec<String>, CrossgridError> {
        Ok(self.symbols.clone())
    }
}
