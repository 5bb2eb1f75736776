//! Core domain types and logic.

pub mod error;
pub mod grid;
pub mod price_series;
pub mod rank;
pub mod simulate;
pub mod sma;
