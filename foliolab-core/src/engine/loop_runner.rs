//! Day-by-day simulation loop.

use super::lot_book::LotBook;
use super::state::{Asset, EngineError, ExecutedTrade, RunResult};
use super::strategy::RebalanceStrategy;
use crate::domain::{PriceSeries, Symbol};
use crate::policy::{PortfolioSnapshot, RebalancePolicy};
use std::collections::HashMap;

/// Run a backtest over `prices`.
///
/// One state transition per day index: consult `policy`, execute any
/// rebalance through `strategy`, then mark to market and append to the
/// history. Fails before touching any state if the series is empty or an
/// asset has no price column.
pub fn run_backtest(
    prices: &PriceSeries,
    assets: &[Asset],
    initial_cash: f64,
    strategy: &RebalanceStrategy,
    policy: &dyn RebalancePolicy,
) -> Result<RunResult, EngineError> {
    if prices.is_empty() {
        return Err(EngineError::EmptyPriceSeries);
    }
    for asset in assets {
        if !prices.has_symbol(&asset.symbol) {
            return Err(EngineError::MissingPriceColumn(asset.symbol.clone()));
        }
    }

    let days = prices.len();
    let mut cash = initial_cash;
    let mut book = LotBook::new();
    let mut result = RunResult {
        initial_cash,
        dates: Vec::with_capacity(days),
        cash: Vec::with_capacity(days),
        values: Vec::with_capacity(days),
        weights: Vec::with_capacity(days),
        trades: Vec::new(),
    };

    for (index, &date) in prices.dates().iter().enumerate() {
        let mut day_prices: HashMap<Symbol, f64> = HashMap::with_capacity(assets.len());
        for asset in assets {
            let price = prices
                .price(&asset.symbol, index)
                .ok_or_else(|| EngineError::MissingPriceColumn(asset.symbol.clone()))?;
            day_prices.insert(asset.symbol.clone(), price);
        }

        let snapshot = PortfolioSnapshot {
            day_index: index,
            cash,
            positions: assets
                .iter()
                .map(|a| (a.symbol.clone(), book.shares(&a.symbol)))
                .collect(),
            prices: day_prices.clone(),
        };
        if let Some(targets) = policy.evaluate(&snapshot, date) {
            let trades = strategy.execute(&mut book, &mut cash, &targets, &day_prices, date);
            result
                .trades
                .extend(trades.into_iter().map(|trade| ExecutedTrade { date, trade }));
        }

        // Mark to market: total first, then each weight against it.
        let mut total = cash;
        for asset in assets {
            total += book.shares(&asset.symbol) * day_prices[&asset.symbol];
        }
        let mut weights = HashMap::with_capacity(assets.len());
        for asset in assets {
            let value = book.shares(&asset.symbol) * day_prices[&asset.symbol];
            let weight = if total != 0.0 { value / total } else { 0.0 };
            weights.insert(asset.symbol.clone(), weight);
        }

        result.dates.push(date);
        result.cash.push(cash);
        result.values.push(total);
        result.weights.push(weights);
    }

    Ok(result)
}
