//! Drift-driven rebalancing.

use super::{PortfolioSnapshot, RebalancePolicy};
use crate::domain::Symbol;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Fires when the sum of squared weight drifts exceeds `threshold`.
///
/// Drift is measured per target symbol against the snapshot's weights; a
/// symbol the portfolio does not hold drifts by its full target weight.
#[derive(Debug, Clone)]
pub struct DriftThreshold {
    targets: HashMap<Symbol, f64>,
    threshold: f64,
}

impl DriftThreshold {
    pub fn new(targets: HashMap<Symbol, f64>, threshold: f64) -> Self {
        Self { targets, threshold }
    }

    fn drift_cost(&self, snapshot: &PortfolioSnapshot) -> f64 {
        let weights = snapshot.weights();
        self.targets
            .iter()
            .map(|(symbol, target)| {
                let drift = weights.get(symbol).copied().unwrap_or(0.0) - target;
                drift * drift
            })
            .sum()
    }
}

impl RebalancePolicy for DriftThreshold {
    fn evaluate(
        &self,
        snapshot: &PortfolioSnapshot,
        _date: NaiveDate,
    ) -> Option<HashMap<Symbol, f64>> {
        (self.drift_cost(snapshot) > self.threshold).then(|| self.targets.clone())
    }
}
