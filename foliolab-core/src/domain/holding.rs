//! Holding — a symbol position with a target weight and its tax lots.

use super::lot::TaxLot;
use super::Symbol;
use serde::{Deserialize, Serialize};

/// One portfolio position.
///
/// A holding exclusively owns its lots; engines take lot copies when
/// computing tax cost and never reorder or mutate the owned list. Target
/// weights are not forced to sum to 1 across holdings — that contract sits
/// with the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: Symbol,
    /// Desired fraction of total portfolio value, 0..=1.
    pub target_weight: f64,
    pub lots: Vec<TaxLot>,
}

impl Holding {
    pub fn new(symbol: impl Into<Symbol>, target_weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight,
            lots: Vec::new(),
        }
    }

    pub fn with_lots(symbol: impl Into<Symbol>, target_weight: f64, lots: Vec<TaxLot>) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight,
            lots,
        }
    }

    /// Total shares across lots.
    pub fn shares(&self) -> f64 {
        self.lots.iter().map(|lot| lot.shares).sum()
    }

    /// Market value: sum of lot values at `price`.
    pub fn value(&self, price: f64) -> f64 {
        self.lots.iter().map(|lot| lot.value(price)).sum()
    }
}
