//! CSV history rows.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};
use crate::types::Symbol;

/// One row of a price history download.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Symbol the history was downloaded for.
    pub symbol: Symbol,
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Split/dividend adjusted close.
    pub adjclose: f64,
    /// Traded volume.
    pub volume: i64,
}

impl HistoryRow {
    /// Converts history rows to a DataFrame.
    ///
    /// Columns: symbol, date, open, high, low, close, adjusted_close, volume.
    pub fn to_dataframe(rows: &[Self]) -> Result<DataFrame> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| MarketError::Local("invalid epoch date".to_string()))?;
        let dates: Vec<i32> = rows
            .iter()
            .map(|r| (r.date - epoch).num_days() as i32)
            .collect();

        let date_col = Column::new("date".into(), dates)
            .cast(&DataType::Date)
            .map_err(|e| MarketError::Local(e.to_string()))?;

        DataFrame::new(vec![
            Column::new(
                "symbol".into(),
                rows.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
            ),
            date_col,
            Column::new("open".into(), rows.iter().map(|r| r.open).collect::<Vec<_>>()),
            Column::new("high".into(), rows.iter().map(|r| r.high).collect::<Vec<_>>()),
            Column::new("low".into(), rows.iter().map(|r| r.low).collect::<Vec<_>>()),
            Column::new("close".into(), rows.iter().map(|r| r.close).collect::<Vec<_>>()),
            Column::new(
                "adjusted_close".into(),
                rows.iter().map(|r| r.adjclose).collect::<Vec<_>>(),
            ),
            Column::new("volume".into(), rows.iter().map(|r| r.volume).collect::<Vec<_>>()),
        ])
        .map_err(|e| MarketError::Local(e.to_string()))
    }
}
