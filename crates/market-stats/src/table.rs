//! Multi-series join and correlation table.
//!
//! Series sampled on different calendars (exchange holidays, listing dates)
//! are aligned on the trading days they all share. Timestamps are compared
//! at UTC day resolution.

use chrono::{DateTime, NaiveDate, NaiveTime};
use market_core::{Chart, MarketError, Result};
use polars::prelude::*;
use tracing::debug;

use crate::summary::{SummaryStatistics, correlation};

/// Floors epoch seconds to the start of their UTC day.
#[must_use]
pub fn day_start(timestamp: i64) -> i64 {
    DateTime::from_timestamp(timestamp, 0).map_or(timestamp, |dt| {
        dt.date_naive().and_time(NaiveTime::MIN).and_utc().timestamp()
    })
}

/// Day-floored timestamps present in both ascending calendars, ascending.
#[must_use]
pub fn intersect(a: &[i64], b: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (x, y) = (day_start(a[i]), day_start(b[j]));
        match x.cmp(&y) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(x);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// A borrowed series: ascending timestamps and index-aligned values.
#[derive(Clone, Copy, Debug)]
pub struct Series<'a> {
    /// Series name, used as a column label.
    pub name: &'a str,
    /// Sample timestamps (epoch seconds), ascending.
    pub timestamp: &'a [i64],
    /// Sample values.
    pub values: &'a [f64],
}

impl<'a> From<&'a Chart> for Series<'a> {
    fn from(chart: &'a Chart) -> Self {
        Self {
            name: &chart.symbol,
            timestamp: chart.timestamps(),
            values: chart.adjcloses(),
        }
    }
}

/// Series aligned on their common days, with pairwise correlations and a
/// regression of every series on the first.
///
/// `data[r][t]` is the value of series `r` on day `timestamp[t]`.
/// `correlation` is symmetric. `statistics[r]` carries the regression of
/// series `r` on series 0 for `r > 0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorrelationTable {
    /// Series names, in input order.
    pub names: Vec<String>,
    /// Common days (UTC day starts), ascending.
    pub timestamp: Vec<i64>,
    /// Aligned values, one row per series.
    pub data: Vec<Vec<f64>>,
    /// Pearson correlation matrix.
    pub correlation: Vec<Vec<f64>>,
    /// Per-series statistics.
    pub statistics: Vec<SummaryStatistics>,
}

impl CorrelationTable {
    /// Aligns `series` and computes the statistics.
    ///
    /// When the series share no day the table has no columns and no
    /// statistics are computed.
    #[must_use]
    pub fn fit(series: &[Series<'_>]) -> Self {
        let Some((first, rest)) = series.split_first() else {
            return Self::default();
        };

        let mut timestamp: Vec<i64> = first.timestamp.iter().map(|&t| day_start(t)).collect();
        timestamp.dedup();
        for s in rest {
            if timestamp.is_empty() {
                break;
            }
            timestamp = intersect(&timestamp, s.timestamp);
        }

        let names = series.iter().map(|s| s.name.to_string()).collect();
        if timestamp.is_empty() {
            debug!(rank = series.len(), "Series share no common day");
            return Self {
                names,
                ..Self::default()
            };
        }

        let data: Vec<Vec<f64>> = series.iter().map(|s| paste(s, &timestamp)).collect();
        let mut table = Self {
            names,
            timestamp,
            correlation: vec![vec![0.0; data.len()]; data.len()],
            statistics: Vec::with_capacity(data.len()),
            data,
        };
        table.run_statistics();
        debug!(
            rank = table.rank(),
            size = table.len(),
            "Fitted correlation table"
        );
        table
    }

    /// Aligns the adjusted closes of `charts`.
    #[must_use]
    pub fn from_charts(charts: &[&Chart]) -> Self {
        let series: Vec<Series<'_>> = charts.iter().map(|&c| Series::from(c)).collect();
        Self::fit(&series)
    }

    fn run_statistics(&mut self) {
        for i in 0..self.data.len() {
            let mut stats = SummaryStatistics::from_slice(&self.data[i]);
            for j in 0..=i {
                let r = correlation(&self.data[i], &self.data[j]);
                self.correlation[i][j] = r;
                self.correlation[j][i] = r;
            }
            if i > 0 {
                let reference = &self.statistics[0];
                stats.correlation = self.correlation[0][i];
                stats.covariance = stats.correlation * stats.stddev * reference.stddev;
                stats.slope = if reference.stddev > 0.0 {
                    stats.correlation * stats.stddev / reference.stddev
                } else {
                    0.0
                };
                stats.intercept = stats.mean - stats.slope * reference.mean;
            }
            self.statistics.push(stats);
        }
    }

    /// Number of series.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.names.len()
    }

    /// Number of common days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    /// Returns true if the series share no day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }

    /// Converts the aligned values to a DataFrame with a `date` column and one
    /// column per series.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .ok_or_else(|| MarketError::Local("invalid epoch date".to_string()))?;
        let dates: Vec<i32> = self
            .timestamp
            .iter()
            .map(|&t| {
                DateTime::from_timestamp(t, 0)
                    .map_or(0, |dt| (dt.date_naive() - epoch).num_days() as i32)
            })
            .collect();

        let mut columns = vec![
            Column::new("date".into(), dates)
                .cast(&DataType::Date)
                .map_err(|e| MarketError::Local(e.to_string()))?,
        ];
        for (name, row) in self.names.iter().zip(&self.data) {
            columns.push(Column::new(name.as_str().into(), row.clone()));
        }

        DataFrame::new(columns).map_err(|e| MarketError::Local(e.to_string()))
    }
}

/// Projects `series` onto the ascending `days`.
fn paste(series: &Series<'_>, days: &[i64]) -> Vec<f64> {
    let mut row = vec![0.0; days.len()];
    let mut j = 0;
    for (&t, &v) in series.timestamp.iter().zip(series.values) {
        if j == days.len() {
            break;
        }
        if day_start(t) == days[j] {
            row[j] = v;
            j += 1;
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    /// 2024-01-02 14:30 UTC, a US market open.
    const OPEN: i64 = 1_704_205_800;

    fn days(indices: &[i64]) -> Vec<i64> {
        indices.iter().map(|i| OPEN + i * DAY).collect()
    }

    fn series<'a>(name: &'a str, ts: &'a [i64], values: &'a [f64]) -> Series<'a> {
        Series {
            name,
            timestamp: ts,
            values,
        }
    }

    #[test]
    fn test_day_start() {
        assert_eq!(day_start(OPEN), 1_704_153_600);
        assert_eq!(day_start(1_704_153_600), 1_704_153_600);
        assert_eq!(day_start(-1), -DAY);
    }

    #[test]
    fn test_intersect_across_intraday_times() {
        let a = days(&[0, 1, 2, 3]);
        // Same days, sampled at a different time of day.
        let b: Vec<i64> = days(&[1, 3, 5]).iter().map(|t| t + 3_600).collect();
        assert_eq!(
            intersect(&a, &b),
            [day_start(a[1]), day_start(a[3])]
        );
    }

    #[test]
    fn test_disjoint_calendars_give_empty_table() {
        let (a, b) = (days(&[0, 2, 4]), days(&[1, 3, 5]));
        let v = [1.0, 2.0, 3.0];
        let table = CorrelationTable::fit(&[series("A", &a, &v), series("B", &b, &v)]);

        assert!(table.is_empty());
        assert_eq!(table.rank(), 2);
        assert!(table.statistics.is_empty());
    }

    #[test]
    fn test_identical_calendars_keep_every_day() {
        let ts = days(&[0, 1, 2, 3, 4]);
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let table = CorrelationTable::fit(&[series("A", &ts, &a), series("B", &ts, &b)]);

        assert_eq!(table.len(), 5);
        assert_eq!(table.data[1], b);
        assert!((table.correlation[0][1] - 1.0).abs() < 1e-12);
        assert_eq!(table.correlation[0][1], table.correlation[1][0]);

        let stats = &table.statistics[1];
        assert!((stats.slope - 2.0).abs() < 1e-12);
        assert!(stats.intercept.abs() < 1e-12);
    }

    #[test]
    fn test_intersection_is_order_independent() {
        let a = days(&[0, 1, 2, 3, 4, 5]);
        let b = days(&[1, 2, 4, 5]);
        let c = days(&[0, 2, 3, 4, 5]);
        let (va, vb, vc) = ([0.0; 6], [0.0; 4], [0.0; 5]);

        let abc = CorrelationTable::fit(&[
            series("A", &a, &va),
            series("B", &b, &vb),
            series("C", &c, &vc),
        ]);
        let cba = CorrelationTable::fit(&[
            series("C", &c, &vc),
            series("B", &b, &vb),
            series("A", &a, &va),
        ]);

        assert_eq!(abc.timestamp, cba.timestamp);
        assert_eq!(abc.timestamp, days(&[2, 4, 5]).iter().map(|&t| day_start(t)).collect::<Vec<_>>());
    }

    #[test]
    fn test_paste_projects_values() {
        let a = days(&[0, 1, 2, 3]);
        let b = days(&[1, 3]);
        let va = [10.0, 11.0, 12.0, 13.0];
        let vb = [20.0, 21.0];
        let table = CorrelationTable::fit(&[series("A", &a, &va), series("B", &b, &vb)]);

        assert_eq!(table.data[0], [11.0, 13.0]);
        assert_eq!(table.data[1], [20.0, 21.0]);
    }

    #[test]
    fn test_regression_against_reference() {
        let ts = days(&[0, 1, 2, 3, 4, 5, 6]);
        let x = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 8.0];
        let y: Vec<f64> = x.iter().map(|v| 0.5 * v + 3.0).collect();
        let table = CorrelationTable::fit(&[series("X", &ts, &x), series("Y", &ts, &y)]);

        let stats = &table.statistics[1];
        assert!((stats.correlation - 1.0).abs() < 1e-12);
        assert!((stats.slope - 0.5).abs() < 1e-12);
        assert!((stats.intercept - 3.0).abs() < 1e-12);
        assert!((stats.covariance - 0.5 * table.statistics[0].variance).abs() < 1e-9);
        assert_eq!(table.statistics[0].slope, 0.0);
    }

    #[test]
    fn test_from_charts_and_dataframe() {
        let mut gme = Chart::with_capacity(4);
        gme.symbol = "GME".to_string();
        gme.count = 3;
        gme.timestamp[..3].copy_from_slice(&days(&[0, 1, 2]));
        gme.adjclose[..3].copy_from_slice(&[20.0, 21.0, 19.0]);

        let mut amc = gme.clone();
        amc.symbol = "AMC".to_string();
        amc.adjclose[..3].copy_from_slice(&[4.0, 4.5, 3.5]);

        let table = CorrelationTable::from_charts(&[&gme, &amc]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.names, ["GME", "AMC"]);

        let df = table.to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_empty_input() {
        let table = CorrelationTable::fit(&[]);
        assert!(table.is_empty());
        assert_eq!(table.rank(), 0);
    }
}
