//! Engine state — run inputs, per-day history, errors.

use crate::domain::{Symbol, Trade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A portfolio line item: a symbol and its target weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: Symbol,
    /// Desired fraction of total value, 0..=1.
    pub weight: f64,
}

impl Asset {
    pub fn new(symbol: impl Into<Symbol>, weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("price series has no dates")]
    EmptyPriceSeries,

    #[error("no price column for asset '{0}'")]
    MissingPriceColumn(Symbol),
}

/// A trade stamped with its execution day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedTrade {
    pub date: NaiveDate,
    pub trade: Trade,
}

/// Completed run: per-day parallel series plus the trades that produced them.
///
/// `cash[i]`, `values[i]`, `weights[i]` all describe the state after day
/// `i`'s processing, including any trade executed that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub initial_cash: f64,
    pub dates: Vec<NaiveDate>,
    pub cash: Vec<f64>,
    pub values: Vec<f64>,
    pub weights: Vec<HashMap<Symbol, f64>>,
    pub trades: Vec<ExecutedTrade>,
}

impl RunResult {
    /// Number of days processed.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn final_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(self.initial_cash)
    }

    /// The recorded value series seeded with the starting cash — the state
    /// before any day was processed, then one point per day. Statistics are
    /// a pure function of this curve.
    pub fn equity_curve(&self) -> Vec<f64> {
        let mut curve = Vec::with_capacity(self.values.len() + 1);
        curve.push(self.initial_cash);
        curve.extend_from_slice(&self.values);
        curve
    }

    /// Net estimated tax across all executed trades.
    pub fn total_tax_cost(&self) -> f64 {
        self.trades.iter().map(|t| t.trade.tax_cost).sum()
    }
}
