//! Serializable run configuration.

use chrono::NaiveDate;
use foliolab_core::domain::Symbol;
use foliolab_core::engine::{Asset, RebalanceStrategy};
use foliolab_core::policy::{
    BuyAndHold, DriftThreshold, MonthEnd, NeverRebalance, RebalancePolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Serializable configuration for a single backtest run.
///
/// Captures everything needed to reproduce the run: assets and weights,
/// starting cash, rebalance strategy and policy, and the price-data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub initial_cash: f64,
    pub assets: Vec<AssetConfig>,
    pub strategy: RebalanceStrategy,
    pub policy: PolicyConfig,
    pub data: DataConfig,
}

/// One asset line in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub symbol: Symbol,
    pub weight: f64,
}

/// Rebalance policy configuration (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyConfig {
    /// Rebalance on the last day of every month.
    MonthEnd,

    /// Rebalance when aggregate squared drift exceeds `threshold`.
    DriftThreshold { threshold: f64 },

    /// Allocate once on the first day, then hold.
    BuyAndHold,

    /// Never trade; the portfolio stays in cash.
    Never,
}

/// Price-data source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataConfig {
    /// Deterministic synthetic prices over a date range.
    Synthetic {
        start_date: NaiveDate,
        end_date: NaiveDate,
        seed: u64,
    },

    /// Long-format CSV file (`date,symbol,adj_close`).
    Csv { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("no assets configured")]
    NoAssets,

    #[error("initial cash must be positive, got {0}")]
    NonPositiveCash(f64),

    #[error("asset weight for '{symbol}' must be within 0..=1, got {weight}")]
    WeightOutOfRange { symbol: Symbol, weight: f64 },

    #[error("start date {start} is after end date {end}")]
    ReversedDateRange { start: NaiveDate, end: NaiveDate },
}

impl RunConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine would choke on, before any engine
    /// work happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }
        if self.initial_cash <= 0.0 {
            return Err(ConfigError::NonPositiveCash(self.initial_cash));
        }
        for asset in &self.assets {
            if !(0.0..=1.0).contains(&asset.weight) {
                return Err(ConfigError::WeightOutOfRange {
                    symbol: asset.symbol.clone(),
                    weight: asset.weight,
                });
            }
        }
        if let DataConfig::Synthetic {
            start_date,
            end_date,
            ..
        } = &self.data
        {
            if start_date > end_date {
                return Err(ConfigError::ReversedDateRange {
                    start: *start_date,
                    end: *end_date,
                });
            }
        }
        Ok(())
    }

    /// Deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which makes results
    /// comparable (and cacheable) across processes.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }

    /// Engine-side asset list.
    pub fn engine_assets(&self) -> Vec<Asset> {
        self.assets
            .iter()
            .map(|a| Asset::new(a.symbol.clone(), a.weight))
            .collect()
    }

    /// Target-weight map shared by the policies.
    pub fn target_weights(&self) -> HashMap<Symbol, f64> {
        self.assets
            .iter()
            .map(|a| (a.symbol.clone(), a.weight))
            .collect()
    }

    /// Build the configured policy.
    pub fn build_policy(&self) -> Box<dyn RebalancePolicy> {
        let targets = self.target_weights();
        match &self.policy {
            PolicyConfig::MonthEnd => Box::new(MonthEnd::new(targets)),
            PolicyConfig::DriftThreshold { threshold } => {
                Box::new(DriftThreshold::new(targets, *threshold))
            }
            PolicyConfig::BuyAndHold => Box::new(BuyAndHold::new(targets)),
            PolicyConfig::Never => Box::new(NeverRebalance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliolab_core::domain::TaxRates;
    use foliolab_core::rebalance::LotSelector;

    fn sample_config() -> RunConfig {
        RunConfig {
            initial_cash: 100_000.0,
            assets: vec![
                AssetConfig {
                    symbol: "VTI".to_string(),
                    weight: 0.6,
                },
                AssetConfig {
                    symbol: "BND".to_string(),
                    weight: 0.4,
                },
            ],
            strategy: RebalanceStrategy::FeeOnly { fee_rate: 0.001 },
            policy: PolicyConfig::MonthEnd,
            data: DataConfig::Synthetic {
                start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                seed: 42,
            },
        }
    }

    #[test]
    fn run_id_is_deterministic() {
        let config = sample_config();
        assert_eq!(config.run_id(), config.run_id());
        assert!(!config.run_id().is_empty());
    }

    #[test]
    fn run_id_changes_with_params() {
        let config = sample_config();
        let mut tweaked = config.clone();
        tweaked.strategy = RebalanceStrategy::TaxAware {
            tax_rates: TaxRates::default(),
            lot_selector: LotSelector::HighestCostFirst,
            min_trade_size: 10.0,
        };
        assert_ne!(config.run_id(), tweaked.run_id());
    }

    #[test]
    fn toml_roundtrip() {
        let text = r#"
initial_cash = 100000.0

[[assets]]
symbol = "VTI"
weight = 0.6

[[assets]]
symbol = "BND"
weight = 0.4

[strategy]
type = "FEE_ONLY"
fee_rate = 0.001

[policy]
type = "MONTH_END"

[data]
type = "SYNTHETIC"
start_date = "2023-01-01"
end_date = "2023-12-31"
seed = 42
"#;
        let config = RunConfig::from_toml(text).unwrap();
        assert_eq!(config, sample_config());
    }

    #[test]
    fn empty_assets_rejected() {
        let mut config = sample_config();
        config.assets.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoAssets)));
    }

    #[test]
    fn non_positive_cash_rejected() {
        let mut config = sample_config();
        config.initial_cash = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveCash(_))
        ));
    }

    #[test]
    fn out_of_range_weight_rejected() {
        let mut config = sample_config();
        config.assets[0].weight = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightOutOfRange { .. })
        ));
    }

    #[test]
    fn reversed_date_range_rejected() {
        let mut config = sample_config();
        config.data = DataConfig::Synthetic {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            seed: 42,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReversedDateRange { .. })
        ));
    }

    #[test]
    fn json_serialization_roundtrip() {
        let config = sample_config();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let deser: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deser);
    }
}
