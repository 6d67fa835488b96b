//! Run orchestration: configuration in, result out.

use crate::config::{DataConfig, RunConfig};
use crate::data_loader::load_prices_csv;
use crate::metrics::SummaryStats;
use crate::result::{BacktestResult, EquityPoint};
use anyhow::Result;
use foliolab_core::data::generate_dummy_prices;
use foliolab_core::domain::PriceSeries;
use foliolab_core::engine::run_backtest;

/// Materialize the configured price source.
fn load_prices(config: &RunConfig) -> Result<PriceSeries> {
    match &config.data {
        DataConfig::Synthetic {
            start_date,
            end_date,
            seed,
        } => {
            let symbols: Vec<_> = config.assets.iter().map(|a| a.symbol.clone()).collect();
            Ok(generate_dummy_prices(&symbols, *start_date, *end_date, *seed))
        }
        DataConfig::Csv { path } => Ok(load_prices_csv(path)?),
    }
}

/// Execute a single configured backtest.
pub fn run(config: &RunConfig) -> Result<BacktestResult> {
    config.validate()?;

    let prices = load_prices(config)?;
    let assets = config.engine_assets();
    let policy = config.build_policy();

    let run_result = run_backtest(
        &prices,
        &assets,
        config.initial_cash,
        &config.strategy,
        policy.as_ref(),
    )?;

    let stats = SummaryStats::from_values(&run_result.equity_curve());
    let equity_curve = run_result
        .dates
        .iter()
        .zip(run_result.cash.iter().zip(run_result.values.iter()))
        .map(|(date, (cash, value))| EquityPoint {
            date: *date,
            cash: *cash,
            value: *value,
        })
        .collect();

    Ok(BacktestResult {
        run_id: config.run_id(),
        equity_curve,
        weights: run_result.weights,
        total_tax_cost: run_result.trades.iter().map(|t| t.trade.tax_cost).sum(),
        trades: run_result.trades,
        stats,
    })
}
