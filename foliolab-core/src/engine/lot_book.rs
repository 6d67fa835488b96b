//! Lot ledger — per-symbol tax lots maintained by the day loop.

use crate::domain::{Symbol, TaxLot};
use crate::rebalance::LotSelector;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Per-symbol lot ledger. Buys append lots at the execution price; sells
/// consume lots in a selector's order and drop lots once fully consumed.
#[derive(Debug, Clone, Default)]
pub struct LotBook {
    lots: HashMap<Symbol, Vec<TaxLot>>,
}

impl LotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total shares held for `symbol`.
    pub fn shares(&self, symbol: &str) -> f64 {
        self.lots
            .get(symbol)
            .map(|lots| lots.iter().map(|lot| lot.shares).sum())
            .unwrap_or(0.0)
    }

    pub fn lots(&self, symbol: &str) -> &[TaxLot] {
        self.lots.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record a purchase as a new lot.
    pub fn buy(&mut self, symbol: &str, shares: f64, price: f64, date: NaiveDate) {
        self.lots
            .entry(symbol.to_string())
            .or_default()
            .push(TaxLot::new(shares, price, date));
    }

    /// Consume `shares` in `selector` order and return the consumed slices
    /// as lots (shares actually sold, original basis and date).
    ///
    /// A request beyond what the book holds is capped at what is available;
    /// callers must not assume exact fulfillment.
    pub fn sell(&mut self, symbol: &str, shares: f64, selector: LotSelector) -> Vec<TaxLot> {
        let Some(stored) = self.lots.get_mut(symbol) else {
            return Vec::new();
        };

        let mut remaining = shares;
        let mut consumed = Vec::new();
        let mut kept = Vec::new();
        for lot in selector.select(stored) {
            if remaining <= 0.0 {
                kept.push(lot);
                continue;
            }
            let take = lot.shares.min(remaining);
            remaining -= take;
            consumed.push(TaxLot::new(take, lot.cost_basis, lot.purchase_date));
            let left = lot.shares - take;
            if left > 0.0 {
                kept.push(TaxLot::new(left, lot.cost_basis, lot.purchase_date));
            }
        }
        *stored = kept;
        consumed
    }
}
