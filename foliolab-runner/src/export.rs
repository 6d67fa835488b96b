//! CSV export of run artifacts.

use crate::result::BacktestResult;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the daily equity curve as `date,cash,value`.
pub fn write_equity_csv(result: &BacktestResult, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "cash", "value"])?;
    for point in &result.equity_curve {
        writer.write_record([
            point.date.to_string(),
            point.cash.to_string(),
            point.value.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the trade log as `date,symbol,shares,amount,tax_cost`.
pub fn write_trades_csv(result: &BacktestResult, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "symbol", "shares", "amount", "tax_cost"])?;
    for executed in &result.trades {
        writer.write_record([
            executed.date.to_string(),
            executed.trade.symbol.clone(),
            executed.trade.shares.to_string(),
            executed.trade.amount.to_string(),
            executed.trade.tax_cost.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
