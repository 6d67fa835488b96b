//! Parameter sweep utilities.
//!
//! Independent runs share no mutable state, so a sweep is embarrassingly
//! parallel: each configuration gets its own engine instance and the grid
//! fans out over rayon.

use anyhow::Result;
use rayon::prelude::*;

use crate::config::{PolicyConfig, RunConfig};
use crate::result::BacktestResult;
use crate::runner;
use foliolab_core::engine::RebalanceStrategy;

/// Parameter grid: the cross product of strategies and policies, applied to
/// a base configuration.
#[derive(Debug, Clone)]
pub struct ParamGrid {
    pub strategies: Vec<RebalanceStrategy>,
    pub policies: Vec<PolicyConfig>,
}

impl ParamGrid {
    /// A small default grid: fee ladder crossed with monthly and drift
    /// policies.
    pub fn fee_ladder_default() -> Self {
        Self {
            strategies: vec![
                RebalanceStrategy::FeeOnly { fee_rate: 0.0 },
                RebalanceStrategy::FeeOnly { fee_rate: 0.001 },
                RebalanceStrategy::FeeOnly { fee_rate: 0.005 },
            ],
            policies: vec![
                PolicyConfig::MonthEnd,
                PolicyConfig::DriftThreshold { threshold: 0.001 },
            ],
        }
    }

    /// Total number of configurations in this grid.
    pub fn size(&self) -> usize {
        self.strategies.len() * self.policies.len()
    }

    /// All configurations in the grid, derived from `base`.
    pub fn generate_configs(&self, base: &RunConfig) -> Vec<RunConfig> {
        let mut configs = Vec::with_capacity(self.size());
        for strategy in &self.strategies {
            for policy in &self.policies {
                let mut config = base.clone();
                config.strategy = strategy.clone();
                config.policy = policy.clone();
                configs.push(config);
            }
        }
        configs
    }
}

/// Sweep executor. Parallel by default.
#[derive(Debug, Clone)]
pub struct ParamSweep {
    parallel: bool,
}

impl Default for ParamSweep {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl ParamSweep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every configuration in the grid.
    pub fn sweep(&self, grid: &ParamGrid, base: &RunConfig) -> Result<Vec<BacktestResult>> {
        let configs = grid.generate_configs(base);
        if self.parallel {
            configs.par_iter().map(runner::run).collect()
        } else {
            configs.iter().map(runner::run).collect()
        }
    }
}

/// The result with the highest Sharpe ratio, if any run produced stats.
pub fn best_by_sharpe(results: &[BacktestResult]) -> Option<&BacktestResult> {
    results
        .iter()
        .filter(|r| r.stats.is_some())
        .max_by(|a, b| {
            let sa = a.stats.as_ref().map(|s| s.sharpe_ratio).unwrap_or(f64::MIN);
            let sb = b.stats.as_ref().map(|s| s.sharpe_ratio).unwrap_or(f64::MIN);
            sa.total_cmp(&sb)
        })
}
