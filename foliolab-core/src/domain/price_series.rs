//! PriceSeries — immutable time-aligned price table for a set of symbols.

use super::Symbol;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceSeriesError {
    #[error("price column for '{symbol}' has {prices} rows but the date index has {dates}")]
    LengthMismatch {
        symbol: Symbol,
        prices: usize,
        dates: usize,
    },
}

/// Adjusted-close table: one ascending date index shared by every symbol.
///
/// Index `i` denotes the same trading day in every column. Constructed once
/// from historical or synthetic data, read-only afterwards. No interpolation
/// or gap-filling: a missing price at an index is a caller error, never a
/// silent default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: HashMap<Symbol, Vec<f64>>,
}

impl PriceSeries {
    /// Build a series, rejecting any column whose length disagrees with the
    /// date index.
    pub fn new(
        dates: Vec<NaiveDate>,
        prices: HashMap<Symbol, Vec<f64>>,
    ) -> Result<Self, PriceSeriesError> {
        for (symbol, column) in &prices {
            if column.len() != dates.len() {
                return Err(PriceSeriesError::LengthMismatch {
                    symbol: symbol.clone(),
                    prices: column.len(),
                    dates: dates.len(),
                });
            }
        }
        Ok(Self { dates, prices })
    }

    /// Price for `symbol` on day `index`, if both exist.
    pub fn price(&self, symbol: &str, index: usize) -> Option<f64> {
        self.prices.get(symbol)?.get(index).copied()
    }

    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of trading days in the series.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(|s| s.as_str())
    }
}
