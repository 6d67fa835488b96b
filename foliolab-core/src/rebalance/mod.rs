//! Tax-aware rebalancing: lot selection, drift measures, trade generation.

pub mod engine;
pub mod selector;

pub use engine::{
    current_weights, drift, drift_cost, portfolio_value, rebalance, sell_tax_cost, target_delta,
    RebalanceConfig,
};
pub use selector::LotSelector;
