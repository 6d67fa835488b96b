//! Performance statistics — pure functions over a recorded value series.
//!
//! Statistics depend on nothing but the equity curve; they can be recomputed
//! from a stored result at any time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trading days per year assumed for annualization.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Summary statistics for a completed run.
///
/// `total_return`, `annualized_return`, `volatility`, and `max_drawdown` are
/// expressed ×100 (percent); `sharpe_ratio` and `final_value` are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub final_value: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

impl SummaryStats {
    /// Compute from a value series seeded with the starting value
    /// (see `RunResult::equity_curve`).
    ///
    /// Needs at least two points — anything shorter has no return to
    /// measure and yields `None`.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let initial = values[0];
        let final_value = values[values.len() - 1];
        let total_return = final_value / initial - 1.0;

        // One return interval per simulated day.
        let num_days = values.len() - 1;
        let years = num_days as f64 / TRADING_DAYS_PER_YEAR;
        let annualized_return = (1.0 + total_return).powf(1.0 / years) - 1.0;

        let returns = daily_returns(values);
        let volatility = std_dev_population(&returns) * TRADING_DAYS_PER_YEAR.sqrt();

        // Return per unit of volatility; no risk-free leg.
        let sharpe_ratio = if volatility > 0.0 {
            annualized_return / volatility
        } else {
            0.0
        };

        Some(Self {
            final_value,
            total_return: total_return * 100.0,
            annualized_return: annualized_return * 100.0,
            volatility: volatility * 100.0,
            sharpe_ratio,
            max_drawdown: max_drawdown(values) * 100.0,
        })
    }

    /// String-keyed view for table rendering and JSON consumers.
    pub fn to_map(&self) -> HashMap<String, f64> {
        [
            ("final_value", self.final_value),
            ("total_return", self.total_return),
            ("annualized_return", self.annualized_return),
            ("volatility", self.volatility),
            ("sharpe_ratio", self.sharpe_ratio),
            ("max_drawdown", self.max_drawdown),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

/// `value[i] / value[i-1] - 1` for each consecutive pair.
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Population standard deviation (divides by N, not N-1).
pub fn std_dev_population(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Largest peak-to-trough decline as a positive fraction of the running peak.
pub fn max_drawdown(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mut peak = values[0];
    let mut max_dd = 0.0;
    for &value in values {
        if value > peak {
            peak = value;
        }
        let dd = (peak - value) / peak;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_series_has_no_stats() {
        assert!(SummaryStats::from_values(&[]).is_none());
        assert!(SummaryStats::from_values(&[100_000.0]).is_none());
    }

    #[test]
    fn required_keys_are_always_present() {
        let stats = SummaryStats::from_values(&[100.0, 101.0, 99.0]).unwrap();
        let map = stats.to_map();
        for key in ["final_value", "total_return", "volatility", "sharpe_ratio"] {
            assert!(map.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn total_return_is_percent_scaled() {
        let stats = SummaryStats::from_values(&[100.0, 110.0]).unwrap();
        assert!((stats.total_return - 10.0).abs() < 1e-10);
        assert_eq!(stats.final_value, 110.0);
    }

    #[test]
    fn one_trading_year_annualizes_to_itself() {
        // 252 return intervals with a 10% total gain.
        let mut values = vec![100_000.0];
        let daily = (1.1_f64).powf(1.0 / 252.0);
        for i in 1..=252 {
            values.push(values[i - 1] * daily);
        }
        let stats = SummaryStats::from_values(&values).unwrap();
        assert!((stats.annualized_return - 10.0).abs() < 0.01);
    }

    #[test]
    fn monotone_series_has_zero_drawdown() {
        let values: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 50.0).collect();
        let stats = SummaryStats::from_values(&values).unwrap();
        assert_eq!(stats.max_drawdown, 0.0);
    }

    #[test]
    fn known_drawdown() {
        let values = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        let expected = (110_000.0 - 90_000.0) / 110_000.0 * 100.0;
        let stats = SummaryStats::from_values(&values).unwrap();
        assert!((stats.max_drawdown - expected).abs() < 1e-9);
    }

    #[test]
    fn constant_series_has_zero_volatility_and_sharpe() {
        let stats = SummaryStats::from_values(&[100.0; 50]).unwrap();
        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.sharpe_ratio, 0.0);
        assert_eq!(stats.total_return, 0.0);
    }

    #[test]
    fn volatility_uses_population_std_dev() {
        // Returns: +10%, -10% → mean 0, population std = 0.1.
        let values = vec![100.0, 110.0, 99.0];
        let returns = daily_returns(&values);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] - (-0.1)).abs() < 1e-12);
        let expected = 0.1 * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;
        let stats = SummaryStats::from_values(&values).unwrap();
        assert!((stats.volatility - expected).abs() < 1e-9);
    }

    #[test]
    fn daily_returns_edge_cases() {
        assert!(daily_returns(&[]).is_empty());
        assert!(daily_returns(&[100.0]).is_empty());
        assert_eq!(daily_returns(&[100.0, 110.0]).len(), 1);
    }
}
