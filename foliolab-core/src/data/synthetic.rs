//! Synthetic price generation for demos, tests, and benchmarks.

use crate::domain::{PriceSeries, Symbol};
use crate::rng::SeedHierarchy;
use chrono::{Duration, NaiveDate};
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;

const START_PRICE: f64 = 100.0;
const DAILY_DRIFT: f64 = 0.0001;
const DAILY_VOL: f64 = 0.01;

/// Generate a calendar-day price table for `symbols` over `[start, end]`,
/// inclusive on both ends.
///
/// Each symbol walks independently from 100.0 with daily returns drawn from
/// Normal(1e-4, 1e-2), seeded per symbol from `master_seed`. The same seed
/// always reproduces the same table, regardless of symbol order or how many
/// symbols are requested alongside.
pub fn generate_dummy_prices(
    symbols: &[Symbol],
    start: NaiveDate,
    end: NaiveDate,
    master_seed: u64,
) -> PriceSeries {
    let mut dates = Vec::new();
    let mut day = start;
    while day <= end {
        dates.push(day);
        day = day + Duration::days(1);
    }

    let seeds = SeedHierarchy::new(master_seed);
    let returns = Normal::new(DAILY_DRIFT, DAILY_VOL).expect("constant parameters are valid");

    let mut table: HashMap<Symbol, Vec<f64>> = HashMap::with_capacity(symbols.len());
    for symbol in symbols {
        let mut rng = seeds.rng_for(symbol);
        let mut column = Vec::with_capacity(dates.len());
        let mut price = START_PRICE;
        if !dates.is_empty() {
            column.push(price);
        }
        for _ in 1..dates.len() {
            price *= 1.0 + returns.sample(&mut rng);
            column.push(price);
        }
        table.insert(symbol.clone(), column);
    }

    PriceSeries::new(dates, table).expect("generated columns are aligned by construction")
}
