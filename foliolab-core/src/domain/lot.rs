//! TaxLot — a discrete purchase batch with its own cost basis and date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Capital gains tax rates, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    pub short_term: f64,
    pub long_term: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            short_term: 0.35,
            long_term: 0.15,
        }
    }
}

/// A single purchase batch within a holding.
///
/// Lots are value types: sells never edit a lot in place, they replace it
/// with a reduced copy (or drop it once fully consumed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLot {
    pub shares: f64,
    /// Cost per share at acquisition.
    pub cost_basis: f64,
    pub purchase_date: NaiveDate,
}

impl TaxLot {
    pub fn new(shares: f64, cost_basis: f64, purchase_date: NaiveDate) -> Self {
        Self {
            shares,
            cost_basis,
            purchase_date,
        }
    }

    /// Market value of this lot at `price`.
    pub fn value(&self, price: f64) -> f64 {
        self.shares * price
    }

    /// Total cost basis.
    pub fn total_cost(&self) -> f64 {
        self.shares * self.cost_basis
    }

    /// Gain (positive) or loss (negative) at `price`.
    pub fn unrealized_gain(&self, price: f64) -> f64 {
        self.value(price) - self.total_cost()
    }

    /// Long-term when held strictly more than 365 days as of `as_of`.
    pub fn is_long_term(&self, as_of: NaiveDate) -> bool {
        as_of - self.purchase_date > Duration::days(365)
    }

    /// Estimated tax from selling the whole lot at `price`.
    ///
    /// Negative when the lot is underwater: the loss offsets gains elsewhere.
    pub fn tax_cost(&self, price: f64, as_of: NaiveDate, rates: &TaxRates) -> f64 {
        let rate = if self.is_long_term(as_of) {
            rates.long_term
        } else {
            rates.short_term
        };
        self.unrealized_gain(price) * rate
    }
}
