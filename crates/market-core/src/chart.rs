//! Chart (OHLCV time series) record.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cache::{Record, RecordKind};
use crate::error::{MarketError, Result};
use crate::types::WINDOW_LENGTH;

/// A bounded OHLCV time series for one symbol.
///
/// The series is stored as parallel, index-aligned arrays of fixed capacity.
/// Only the first [`count`](Self::count) entries are valid; the remainder is
/// zero. `count` never exceeds the capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Symbol reported in the chart metadata.
    pub symbol: String,
    /// Close preceding the first point of the requested range.
    pub chart_previous_close: f64,
    /// Latest regular market price.
    pub regular_market_price: f64,
    /// Number of valid points.
    pub count: usize,
    /// Point timestamps (epoch seconds).
    pub timestamp: Vec<i64>,
    /// Split/dividend adjusted closes.
    pub adjclose: Vec<f64>,
    /// Closing prices.
    pub close: Vec<f64>,
    /// Highest prices.
    pub high: Vec<f64>,
    /// Lowest prices.
    pub low: Vec<f64>,
    /// Opening prices.
    pub open: Vec<f64>,
    /// Traded volumes.
    pub volume: Vec<i64>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::with_capacity(WINDOW_LENGTH)
    }
}

impl Chart {
    /// Creates an empty chart holding at most `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbol: String::new(),
            chart_previous_close: 0.0,
            regular_market_price: 0.0,
            count: 0,
            timestamp: vec![0; capacity],
            adjclose: vec![0.0; capacity],
            close: vec![0.0; capacity],
            high: vec![0.0; capacity],
            low: vec![0.0; capacity],
            open: vec![0.0; capacity],
            volume: vec![0; capacity],
        }
    }

    /// Maximum number of points this chart can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.timestamp.len()
    }

    /// Returns true if no point is valid.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Valid timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamp[..self.count]
    }

    /// Valid adjusted closes.
    #[must_use]
    pub fn adjcloses(&self) -> &[f64] {
        &self.adjclose[..self.count]
    }

    /// Valid closes.
    #[must_use]
    pub fn closes(&self) -> &[f64] {
        &self.close[..self.count]
    }

    /// Latest valid adjusted close, if any.
    #[must_use]
    pub fn last_adjclose(&self) -> Option<f64> {
        self.adjcloses().last().copied()
    }

    /// Converts the valid prefix to a DataFrame.
    ///
    /// Columns: timestamp, open, high, low, close, adjusted_close, volume.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let n = self.count;
        DataFrame::new(vec![
            Column::new("timestamp".into(), self.timestamp[..n].to_vec()),
            Column::new("open".into(), self.open[..n].to_vec()),
            Column::new("high".into(), self.high[..n].to_vec()),
            Column::new("low".into(), self.low[..n].to_vec()),
            Column::new("close".into(), self.close[..n].to_vec()),
            Column::new("adjusted_close".into(), self.adjclose[..n].to_vec()),
            Column::new("volume".into(), self.volume[..n].to_vec()),
        ])
        .map_err(|e| MarketError::Local(e.to_string()))
    }
}

impl Record for Chart {
    const KIND: RecordKind = RecordKind::Chart;

    fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let chart = Chart::default();
        assert_eq!(chart.capacity(), WINDOW_LENGTH);
        assert!(chart.is_empty());
        assert!(chart.timestamps().is_empty());
        assert!(chart.close.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_to_dataframe_uses_valid_prefix() {
        let mut chart = Chart::with_capacity(8);
        chart.count = 3;
        chart.timestamp[..3].copy_from_slice(&[1, 2, 3]);
        chart.adjclose[..3].copy_from_slice(&[1.0, 2.0, 3.0]);

        let df = chart.to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 7);
        assert_eq!(chart.last_adjclose(), Some(3.0));
    }
}
