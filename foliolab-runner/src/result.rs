//! Backtest result — run output plus derived statistics.

use crate::config::RunId;
use crate::metrics::SummaryStats;
use chrono::NaiveDate;
use foliolab_core::domain::Symbol;
use foliolab_core::engine::ExecutedTrade;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete, serializable result of a backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Hash of the configuration that produced this result.
    pub run_id: RunId,

    /// Per-day state after processing, in date order.
    pub equity_curve: Vec<EquityPoint>,

    /// Per-day weight snapshots, parallel to `equity_curve`.
    pub weights: Vec<HashMap<Symbol, f64>>,

    /// Every trade the run executed, stamped with its day.
    pub trades: Vec<ExecutedTrade>,

    /// Net estimated tax across all trades.
    pub total_tax_cost: f64,

    /// Derived statistics; absent for degenerate (sub-two-day) runs.
    pub stats: Option<SummaryStats>,
}

/// Single point in the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub cash: f64,
    pub value: f64,
}

impl BacktestResult {
    pub fn final_value(&self) -> f64 {
        self.equity_curve.last().map(|p| p.value).unwrap_or(0.0)
    }
}
