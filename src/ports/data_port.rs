//! Data access port trait.

use crate::domain::error::CrossgridError;
use crate::domain::price_series::PriceSeries;

pub trait DataPort {
    /// Full close-price history for one symbol, oldest first.
    fn fetch_prices(&self, symbol: &str) -> Result<PriceSeries, CrossgridError>;

    fn list_symbols(&self) -> Result<Vec<String>, CrossgridError>;
}
