//! FolioLab Runner — backtest orchestration.
//!
//! Sits on top of `foliolab-core` and owns everything around a run:
//! - Serializable run configuration with content-addressed run IDs
//! - Price ingest from CSV and synthetic generation dispatch
//! - Summary statistics over the recorded value series
//! - CSV export of equity curves and trade logs
//! - Rayon-parallel parameter sweeps

pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod result;
pub mod runner;
pub mod sweep;

pub use config::{AssetConfig, ConfigError, DataConfig, PolicyConfig, RunConfig, RunId};
pub use metrics::SummaryStats;
pub use result::{BacktestResult, EquityPoint};
pub use runner::run;
pub use sweep::{best_by_sharpe, ParamGrid, ParamSweep};
