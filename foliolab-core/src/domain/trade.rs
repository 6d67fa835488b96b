//! Trade — a signed buy/sell instruction with estimated tax impact.

use super::Symbol;
use serde::{Deserialize, Serialize};

/// A single trade emitted by a rebalance.
///
/// Sign convention: positive `shares`/`amount` is a buy, negative a sell.
/// `tax_cost` is only populated on sells; negative means the sale realizes a
/// loss and yields a tax benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub shares: f64,
    pub amount: f64,
    pub tax_cost: f64,
}

impl Trade {
    /// Buy of `shares` shares worth `amount` dollars (both positive).
    pub fn buy(symbol: impl Into<Symbol>, shares: f64, amount: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares,
            amount,
            tax_cost: 0.0,
        }
    }

    /// Sell of `shares` shares worth `amount` dollars (magnitudes; stored
    /// negated per the sign convention).
    pub fn sell(symbol: impl Into<Symbol>, shares: f64, amount: f64, tax_cost: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares: -shares,
            amount: -amount,
            tax_cost,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.shares > 0.0
    }

    pub fn is_sell(&self) -> bool {
        self.shares < 0.0
    }
}

/// Net estimated tax across a trade list. Losses offset gains.
pub fn total_tax_cost(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.tax_cost).sum()
}
