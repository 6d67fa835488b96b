//! Tax-lot selection strategies.

use crate::domain::TaxLot;
use serde::{Deserialize, Serialize};

/// Policy choosing which lots to consume when selling.
///
/// Trade-off: FIFO is the simplest and the usual broker default, but sells
/// the oldest (often lowest-basis) shares first; HighestCostFirst minimizes
/// the realized gain when prices have risen since most purchases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotSelector {
    /// Oldest purchase date first.
    #[default]
    Fifo,
    /// Newest purchase date first.
    Lifo,
    /// Highest cost basis first.
    HighestCostFirst,
}

impl LotSelector {
    /// Lots in consumption order, as a fresh copy.
    ///
    /// The caller's slice is never reordered or mutated; sell logic consumes
    /// the returned copy.
    pub fn select(&self, lots: &[TaxLot]) -> Vec<TaxLot> {
        let mut ordered = lots.to_vec();
        match self {
            LotSelector::Fifo => ordered.sort_by_key(|lot| lot.purchase_date),
            LotSelector::Lifo => {
                ordered.sort_by_key(|lot| std::cmp::Reverse(lot.purchase_date));
            }
            LotSelector::HighestCostFirst => {
                ordered.sort_by(|a, b| b.cost_basis.total_cmp(&a.cost_basis));
            }
        }
        ordered
    }
}
