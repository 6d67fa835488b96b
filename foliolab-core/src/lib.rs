//! FolioLab Core — portfolio simulation engine.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (price series, tax lots, holdings, trades)
//! - Tax-aware snapshot rebalancing with pluggable lot selection
//! - Rebalance policies (calendar-driven, drift-driven, buy-and-hold)
//! - Day-by-day backtest loop with fee-only and tax-aware strategies
//! - Deterministic per-symbol seeding and synthetic price generation
//!
//! The core performs no I/O: price data arrives as a finished
//! [`domain::PriceSeries`] and results leave as plain values.

pub mod data;
pub mod domain;
pub mod engine;
pub mod policy;
pub mod rebalance;
pub mod rng;
