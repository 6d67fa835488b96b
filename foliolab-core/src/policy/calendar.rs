//! Calendar-driven rebalancing.

use super::{PortfolioSnapshot, RebalancePolicy};
use crate::domain::Symbol;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

/// Fires on the last trading day of each month.
///
/// Month-end is detected by looking one day ahead: if tomorrow falls in a
/// different month, today is the last day. This needs no month-length table
/// and handles leap years for free.
#[derive(Debug, Clone)]
pub struct MonthEnd {
    targets: HashMap<Symbol, f64>,
}

impl MonthEnd {
    pub fn new(targets: HashMap<Symbol, f64>) -> Self {
        Self { targets }
    }
}

impl RebalancePolicy for MonthEnd {
    fn evaluate(
        &self,
        _snapshot: &PortfolioSnapshot,
        date: NaiveDate,
    ) -> Option<HashMap<Symbol, f64>> {
        let tomorrow = date + Duration::days(1);
        (tomorrow.month() != date.month()).then(|| self.targets.clone())
    }
}
