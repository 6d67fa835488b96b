//! Rebalance policies — when to trade, and toward what weights.
//!
//! A policy is consulted once per simulated day with a read-only snapshot of
//! the portfolio. Implementations must be pure and deterministic: same
//! snapshot and date, same answer. The engine relies on this for
//! reproducible runs.

pub mod calendar;
pub mod drift;

pub use calendar::MonthEnd;
pub use drift::DriftThreshold;

use crate::domain::Symbol;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Point-in-time view of the simulated portfolio, handed to policies.
#[derive(Debug, Clone)]
pub struct PortfolioSnapshot {
    /// Zero-based index of the day being processed.
    pub day_index: usize,
    pub cash: f64,
    /// Share count per symbol.
    pub positions: HashMap<Symbol, f64>,
    /// Latest price per symbol.
    pub prices: HashMap<Symbol, f64>,
}

impl PortfolioSnapshot {
    /// Cash plus the market value of every position.
    pub fn total_value(&self) -> f64 {
        let positions: f64 = self
            .positions
            .iter()
            .filter_map(|(symbol, qty)| self.prices.get(symbol).map(|price| qty * price))
            .sum();
        self.cash + positions
    }

    /// Weight of each symbol against the day's total value (cash included).
    /// Empty when total value is zero.
    pub fn weights(&self) -> HashMap<Symbol, f64> {
        let total = self.total_value();
        if total == 0.0 {
            return HashMap::new();
        }
        self.positions
            .iter()
            .filter_map(|(symbol, qty)| {
                self.prices
                    .get(symbol)
                    .map(|price| (symbol.clone(), qty * price / total))
            })
            .collect()
    }
}

/// Decides, once per simulated day, whether to rebalance and toward what.
pub trait RebalancePolicy {
    /// `Some(targets)` to rebalance toward `targets` today, `None` to hold.
    fn evaluate(
        &self,
        snapshot: &PortfolioSnapshot,
        date: NaiveDate,
    ) -> Option<HashMap<Symbol, f64>>;
}

/// Stays in whatever the portfolio starts as. Useful as a baseline and in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRebalance;

impl RebalancePolicy for NeverRebalance {
    fn evaluate(
        &self,
        _snapshot: &PortfolioSnapshot,
        _date: NaiveDate,
    ) -> Option<HashMap<Symbol, f64>> {
        None
    }
}

/// Allocates to the target weights on the first day, then holds.
#[derive(Debug, Clone)]
pub struct BuyAndHold {
    targets: HashMap<Symbol, f64>,
}

impl BuyAndHold {
    pub fn new(targets: HashMap<Symbol, f64>) -> Self {
        Self { targets }
    }
}

impl RebalancePolicy for BuyAndHold {
    fn evaluate(
        &self,
        snapshot: &PortfolioSnapshot,
        _date: NaiveDate,
    ) -> Option<HashMap<Symbol, f64>> {
        (snapshot.day_index == 0).then(|| self.targets.clone())
    }
}
