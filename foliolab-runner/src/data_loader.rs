//! CSV price ingest.
//!
//! Long format, one row per (symbol, day): `date,symbol,adj_close`. Rows for
//! a symbol must appear in date order, and every symbol must cover the same
//! dates — the fetch collaborator that produced the file owns alignment; the
//! loader only verifies it.

use chrono::NaiveDate;
use foliolab_core::domain::{PriceSeries, PriceSeriesError, Symbol};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv has no rows")]
    Empty,

    #[error("malformed price data: {0}")]
    Malformed(#[from] PriceSeriesError),
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    date: NaiveDate,
    symbol: Symbol,
    adj_close: f64,
}

/// Load a long-format CSV into a [`PriceSeries`].
///
/// The date index is taken from the first symbol encountered; any symbol
/// whose row count disagrees is rejected at series construction.
pub fn load_prices_csv(path: &Path) -> Result<PriceSeries, DataError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut columns: HashMap<Symbol, Vec<f64>> = HashMap::new();
    let mut first_symbol: Option<Symbol> = None;

    for row in reader.deserialize() {
        let row: PriceRow = row?;
        if first_symbol.is_none() {
            first_symbol = Some(row.symbol.clone());
        }
        if first_symbol.as_deref() == Some(row.symbol.as_str()) {
            dates.push(row.date);
        }
        columns.entry(row.symbol).or_default().push(row.adj_close);
    }

    if dates.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(PriceSeries::new(dates, columns)?)
}
