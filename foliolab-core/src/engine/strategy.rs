//! Rebalance strategies — how the day loop turns target weights into trades.
//!
//! Both variants size trades through [`crate::rebalance::target_delta`]; they
//! differ in friction: a flat proportional fee versus a lot-level tax
//! estimate with a minimum trade filter.

use super::lot_book::LotBook;
use crate::domain::{Symbol, TaxRates, Trade};
use crate::rebalance::{target_delta, LotSelector};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trade-execution model for the day loop, selected by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceStrategy {
    /// Charge `fee_rate` of traded notional per trade. No tax model, no
    /// minimum trade size: any nonzero diff executes.
    FeeOnly { fee_rate: f64 },

    /// Estimate tax per sell by walking lots in `lot_selector` order, using
    /// the execution day as the holding-period boundary. Diffs under
    /// `min_trade_size` are left alone. No fee.
    TaxAware {
        tax_rates: TaxRates,
        lot_selector: LotSelector,
        min_trade_size: f64,
    },
}

impl RebalanceStrategy {
    /// Execute one rebalance against the book: mutate cash and lots, return
    /// the trades performed.
    ///
    /// Symbols are visited in sorted order so trade lists and float
    /// accumulation are reproducible run to run. A zero-value portfolio is
    /// left alone (nothing to size trades against).
    pub(crate) fn execute(
        &self,
        book: &mut LotBook,
        cash: &mut f64,
        targets: &HashMap<Symbol, f64>,
        prices: &HashMap<Symbol, f64>,
        date: NaiveDate,
    ) -> Vec<Trade> {
        let mut symbols: Vec<&Symbol> = targets.keys().collect();
        symbols.sort();

        let mut total = *cash;
        for symbol in &symbols {
            if let Some(price) = prices.get(*symbol) {
                total += book.shares(symbol) * price;
            }
        }
        if total == 0.0 {
            return Vec::new();
        }

        let mut trades = Vec::new();
        for symbol in symbols {
            let Some(&price) = prices.get(symbol) else {
                continue;
            };
            let weight = targets[symbol];
            let current_value = book.shares(symbol) * price;
            let diff = target_delta(total, weight, current_value);

            match self {
                RebalanceStrategy::FeeOnly { fee_rate } => {
                    let diff_qty = diff / price;
                    if diff_qty == 0.0 {
                        continue;
                    }
                    let trade_cost = price * diff_qty;
                    let fee = fee_rate * trade_cost.abs();
                    *cash -= trade_cost + fee;
                    if diff_qty > 0.0 {
                        book.buy(symbol, diff_qty, price, date);
                        trades.push(Trade::buy(symbol.clone(), diff_qty, trade_cost));
                    } else {
                        book.sell(symbol, -diff_qty, LotSelector::Fifo);
                        trades.push(Trade::sell(symbol.clone(), -diff_qty, -trade_cost, 0.0));
                    }
                }
                RebalanceStrategy::TaxAware {
                    tax_rates,
                    lot_selector,
                    min_trade_size,
                } => {
                    if diff.abs() < *min_trade_size {
                        continue;
                    }
                    if diff > 0.0 {
                        let shares = diff / price;
                        *cash -= diff;
                        book.buy(symbol, shares, price, date);
                        trades.push(Trade::buy(symbol.clone(), shares, diff));
                    } else if diff < 0.0 {
                        let consumed = book.sell(symbol, -diff / price, *lot_selector);
                        let sold: f64 = consumed.iter().map(|lot| lot.shares).sum();
                        if sold == 0.0 {
                            continue;
                        }
                        let tax: f64 = consumed
                            .iter()
                            .map(|lot| lot.tax_cost(price, date, tax_rates))
                            .sum();
                        *cash += sold * price;
                        trades.push(Trade::sell(symbol.clone(), sold, sold * price, tax));
                    }
                }
            }
        }
        trades
    }
}
