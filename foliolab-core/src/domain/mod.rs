//! Domain types for FolioLab

pub mod holding;
pub mod lot;
pub mod price_series;
pub mod trade;

pub use holding::Holding;
pub use lot::{TaxLot, TaxRates};
pub use price_series::{PriceSeries, PriceSeriesError};
pub use trade::{total_tax_cost, Trade};

/// Symbol type alias
pub type Symbol = String;
