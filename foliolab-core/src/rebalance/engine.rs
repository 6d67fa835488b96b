//! Snapshot rebalancing — trades that move holdings toward target weights,
//! with a per-sell tax estimate.
//!
//! Operates on a caller-supplied snapshot of holdings, lots, and prices;
//! performs no I/O and mutates nothing it is given. The day-loop engine
//! shares the diff computation (`target_delta`) but manages its own state.

use super::selector::LotSelector;
use crate::domain::{Holding, Symbol, TaxLot, TaxRates, Trade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Controls tax-aware trade generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceConfig {
    pub tax_rates: TaxRates,
    pub lot_selector: LotSelector,
    /// Valuation date for the long/short-term holding-period boundary.
    pub as_of: NaiveDate,
    /// Dollar diffs smaller than this are left alone.
    pub min_trade_size: f64,
}

impl RebalanceConfig {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            tax_rates: TaxRates::default(),
            lot_selector: LotSelector::Fifo,
            as_of,
            min_trade_size: 0.0,
        }
    }
}

/// Total market value across holdings. Symbols without a quote contribute
/// nothing.
pub fn portfolio_value(holdings: &[Holding], prices: &HashMap<Symbol, f64>) -> f64 {
    holdings
        .iter()
        .filter_map(|h| prices.get(&h.symbol).map(|price| h.value(*price)))
        .sum()
}

/// Weight per symbol. Empty when the portfolio has no value.
pub fn current_weights(
    holdings: &[Holding],
    prices: &HashMap<Symbol, f64>,
) -> HashMap<Symbol, f64> {
    let total = portfolio_value(holdings, prices);
    if total == 0.0 {
        return HashMap::new();
    }
    holdings
        .iter()
        .filter_map(|h| {
            prices
                .get(&h.symbol)
                .map(|price| (h.symbol.clone(), h.value(*price) / total))
        })
        .collect()
}

/// Current weight minus target weight, per symbol. Unpriced holdings count
/// as zero-weight.
pub fn drift(holdings: &[Holding], prices: &HashMap<Symbol, f64>) -> HashMap<Symbol, f64> {
    let weights = current_weights(holdings, prices);
    holdings
        .iter()
        .map(|h| {
            let current = weights.get(&h.symbol).copied().unwrap_or(0.0);
            (h.symbol.clone(), current - h.target_weight)
        })
        .collect()
}

/// Sum of squared drifts — the drift policy's trigger measure.
pub fn drift_cost(holdings: &[Holding], prices: &HashMap<Symbol, f64>) -> f64 {
    drift(holdings, prices).values().map(|d| d * d).sum()
}

/// Dollars to trade to bring a holding from `current_value` to its share of
/// `total_value`. Positive means buy. Shared by both rebalancing paths.
pub fn target_delta(total_value: f64, target_weight: f64, current_value: f64) -> f64 {
    total_value * target_weight - current_value
}

/// Estimated tax from selling `shares` at `price`, consuming the holding's
/// lots in the configured selector's order.
///
/// A request for more shares than the lots hold is capped at what is
/// available; the estimate covers the shares that could actually be sold.
pub fn sell_tax_cost(
    lots: &[TaxLot],
    price: f64,
    shares: f64,
    config: &RebalanceConfig,
) -> f64 {
    let mut remaining = shares;
    let mut total = 0.0;
    for lot in config.lot_selector.select(lots) {
        if remaining <= 0.0 {
            break;
        }
        let consumed = lot.shares.min(remaining);
        let partial = TaxLot::new(consumed, lot.cost_basis, lot.purchase_date);
        total += partial.tax_cost(price, config.as_of, &config.tax_rates);
        remaining -= consumed;
    }
    total
}

/// Generate trades that move `holdings` toward their target weights.
///
/// Returns no trades when the portfolio has zero value (nothing to size
/// trades against). Buys carry no tax cost; sells estimate theirs through
/// [`sell_tax_cost`]. Holdings without a quote are skipped.
pub fn rebalance(
    holdings: &[Holding],
    prices: &HashMap<Symbol, f64>,
    config: &RebalanceConfig,
) -> Vec<Trade> {
    let total = portfolio_value(holdings, prices);
    if total == 0.0 {
        return Vec::new();
    }

    let mut trades = Vec::new();
    for holding in holdings {
        let Some(&price) = prices.get(&holding.symbol) else {
            continue;
        };
        let current = holding.value(price);
        let diff = target_delta(total, holding.target_weight, current);

        if diff.abs() < config.min_trade_size {
            continue;
        }
        if diff > 0.0 {
            trades.push(Trade::buy(holding.symbol.clone(), diff / price, diff));
        } else if diff < 0.0 {
            let sell_amount = -diff;
            let sell_shares = sell_amount / price;
            let tax = sell_tax_cost(&holding.lots, price, sell_shares, config);
            trades.push(Trade::sell(
                holding.symbol.clone(),
                sell_shares,
                sell_amount,
                tax,
            ));
        }
    }
    trades
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn prices_of(pairs: &[(&str, f64)]) -> HashMap<Symbol, f64> {
        pairs.iter().map(|(s, p)| (s.to_string(), *p)).collect()
    }

    /// Two holdings at 42.86% / 57.14% of a 17,500 portfolio, targets 60/40:
    /// VTI buys ~3000, BND sells ~3000.
    #[test]
    fn rebalance_moves_toward_targets() {
        let holdings = vec![
            Holding::with_lots("VTI", 0.6, vec![TaxLot::new(75.0, 100.0, date(2022, 1, 3))]),
            Holding::with_lots("BND", 0.4, vec![TaxLot::new(125.0, 80.0, date(2022, 1, 3))]),
        ];
        let prices = prices_of(&[("VTI", 100.0), ("BND", 80.0)]);
        let config = RebalanceConfig::new(date(2024, 6, 3));

        let trades = rebalance(&holdings, &prices, &config);
        assert_eq!(trades.len(), 2);

        let vti = trades.iter().find(|t| t.symbol == "VTI").unwrap();
        let bnd = trades.iter().find(|t| t.symbol == "BND").unwrap();
        assert!(vti.is_buy());
        assert!((vti.amount - 3_000.0).abs() < 1.0);
        assert!(bnd.is_sell());
        assert!((bnd.amount - (-3_000.0)).abs() < 1.0);
        // Buys never realize gains.
        assert_eq!(vti.tax_cost, 0.0);
    }

    #[test]
    fn balanced_portfolio_yields_no_trades() {
        let holdings = vec![
            Holding::with_lots("VTI", 0.5, vec![TaxLot::new(50.0, 90.0, date(2023, 1, 3))]),
            Holding::with_lots("BND", 0.5, vec![TaxLot::new(62.5, 75.0, date(2023, 1, 3))]),
        ];
        let prices = prices_of(&[("VTI", 100.0), ("BND", 80.0)]);
        let mut config = RebalanceConfig::new(date(2024, 6, 3));
        config.min_trade_size = 1.0;

        assert!(rebalance(&holdings, &prices, &config).is_empty());
    }

    #[test]
    fn zero_value_portfolio_yields_no_trades() {
        let holdings = vec![Holding::new("VTI", 1.0)];
        let prices = prices_of(&[("VTI", 100.0)]);
        let config = RebalanceConfig::new(date(2024, 6, 3));
        assert!(rebalance(&holdings, &prices, &config).is_empty());
    }

    #[test]
    fn min_trade_size_filters_small_diffs() {
        let holdings = vec![
            Holding::with_lots("VTI", 0.5, vec![TaxLot::new(50.1, 90.0, date(2023, 1, 3))]),
            Holding::with_lots("BND", 0.5, vec![TaxLot::new(62.5, 75.0, date(2023, 1, 3))]),
        ];
        let prices = prices_of(&[("VTI", 100.0), ("BND", 80.0)]);
        let mut config = RebalanceConfig::new(date(2024, 6, 3));
        config.min_trade_size = 50.0;

        assert!(rebalance(&holdings, &prices, &config).is_empty());
    }

    #[test]
    fn sell_walks_lots_in_selector_order() {
        // Two lots: old cheap, recent expensive. Sell 15 shares at 100.
        let lots = vec![
            TaxLot::new(10.0, 50.0, date(2021, 1, 4)),
            TaxLot::new(10.0, 90.0, date(2024, 2, 1)),
        ];
        let mut config = RebalanceConfig::new(date(2024, 6, 3));

        // FIFO: 10 long-term @ gain 500 * 0.15 + 5 short-term @ gain 50 * 0.35
        config.lot_selector = LotSelector::Fifo;
        let fifo = sell_tax_cost(&lots, 100.0, 15.0, &config);
        assert!((fifo - (500.0 * 0.15 + 50.0 * 0.35)).abs() < 1e-10);

        // HighestCostFirst: 10 short-term @ gain 100 * 0.35 + 5 long-term @ gain 250 * 0.15
        config.lot_selector = LotSelector::HighestCostFirst;
        let hcf = sell_tax_cost(&lots, 100.0, 15.0, &config);
        assert!((hcf - (100.0 * 0.35 + 250.0 * 0.15)).abs() < 1e-10);
    }

    #[test]
    fn highest_cost_first_beats_fifo_on_net_gains() {
        let lots = vec![
            TaxLot::new(40.0, 30.0, date(2020, 3, 2)),
            TaxLot::new(30.0, 70.0, date(2022, 9, 1)),
            TaxLot::new(30.0, 95.0, date(2023, 11, 1)),
        ];
        let mut config = RebalanceConfig::new(date(2024, 6, 3));

        config.lot_selector = LotSelector::Fifo;
        let fifo = sell_tax_cost(&lots, 110.0, 50.0, &config);
        config.lot_selector = LotSelector::HighestCostFirst;
        let hcf = sell_tax_cost(&lots, 110.0, 50.0, &config);

        assert!(fifo > 0.0);
        assert!(hcf < fifo, "expected {hcf} < {fifo}");
    }

    #[test]
    fn oversized_sell_is_capped_at_available_shares() {
        let lots = vec![TaxLot::new(10.0, 50.0, date(2021, 1, 4))];
        let config = RebalanceConfig::new(date(2024, 6, 3));
        // Request 25 shares; only 10 exist. Tax covers the 10.
        let tax = sell_tax_cost(&lots, 100.0, 25.0, &config);
        assert!((tax - 500.0 * 0.15).abs() < 1e-10);
    }

    #[test]
    fn drift_and_drift_cost() {
        let holdings = vec![
            Holding::with_lots("VTI", 0.6, vec![TaxLot::new(75.0, 100.0, date(2022, 1, 3))]),
            Holding::with_lots("BND", 0.4, vec![TaxLot::new(125.0, 80.0, date(2022, 1, 3))]),
        ];
        let prices = prices_of(&[("VTI", 100.0), ("BND", 80.0)]);

        let d = drift(&holdings, &prices);
        // 7500/17500 - 0.6 and 10000/17500 - 0.4
        assert!((d["VTI"] - (7_500.0 / 17_500.0 - 0.6)).abs() < 1e-12);
        assert!((d["BND"] - (10_000.0 / 17_500.0 - 0.4)).abs() < 1e-12);

        let expected = d["VTI"] * d["VTI"] + d["BND"] * d["BND"];
        assert!((drift_cost(&holdings, &prices) - expected).abs() < 1e-12);
    }

    #[test]
    fn rebalance_does_not_touch_caller_lots() {
        let holdings = vec![
            Holding::with_lots(
                "VTI",
                0.2,
                vec![
                    TaxLot::new(50.0, 120.0, date(2023, 5, 1)),
                    TaxLot::new(50.0, 60.0, date(2020, 5, 1)),
                ],
            ),
            Holding::new("BND", 0.8),
        ];
        let before = holdings.clone();
        let prices = prices_of(&[("VTI", 100.0), ("BND", 80.0)]);
        let mut config = RebalanceConfig::new(date(2024, 6, 3));
        config.lot_selector = LotSelector::HighestCostFirst;

        let trades = rebalance(&holdings, &prices, &config);
        assert!(trades.iter().any(|t| t.is_sell()));
        assert_eq!(holdings, before);
    }
}
