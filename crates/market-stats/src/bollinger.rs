//! Moving-average band indicator.

use market_core::{Chart, MarketError, Result};
use serde::{Deserialize, Serialize};

/// One point of a [`Bollinger`] series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    /// Timestamp of the last sample in the window.
    pub timestamp: i64,
    /// Moving average over the window.
    pub mean: f64,
    /// Moving sample standard deviation over the window.
    pub stddev: f64,
    /// Band half-width, `k * stddev`.
    pub band: f64,
}

impl BandPoint {
    /// Upper band, `mean + band`.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.mean + self.band
    }

    /// Lower band, `mean - band`.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.mean - self.band
    }
}

/// Moving average with a band of `k` moving standard deviations.
///
/// A series of `L` samples with window `n` has `max(0, L - n + 1)` points; the
/// first point covers samples `0..n`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bollinger {
    /// Window length.
    pub n: usize,
    /// Band multiplier.
    pub k: f64,
    /// Indicator points, in sample order.
    pub points: Vec<BandPoint>,
}

impl Bollinger {
    /// Computes the indicator over `data`, labelling each point with the
    /// timestamp of its last sample.
    ///
    /// The window statistics are maintained incrementally: each step adds the
    /// entering sample to a running sum and sum of squares and removes the
    /// leaving one.
    pub fn compute(n: usize, k: f64, timestamp: &[i64], data: &[f64]) -> Result<Self> {
        if n < 2 {
            return Err(MarketError::InvalidParameter(format!(
                "band window must be at least 2, got {n}"
            )));
        }
        if timestamp.len() != data.len() {
            return Err(MarketError::InvalidParameter(format!(
                "{} timestamps for {} samples",
                timestamp.len(),
                data.len()
            )));
        }

        let len = data.len();
        let mut points = Vec::with_capacity((len + 1).saturating_sub(n));
        let window = n as f64;
        let (mut sum, mut tss) = (0.0, 0.0);

        for (i, &x) in data.iter().enumerate() {
            sum += x;
            tss += x * x;
            if i + 1 < n {
                continue;
            }

            let mean = sum / window;
            let stddev = ((tss - 2.0 * mean * sum + window * mean * mean) / (window - 1.0))
                .max(0.0)
                .sqrt();
            points.push(BandPoint {
                timestamp: timestamp[i],
                mean,
                stddev,
                band: k * stddev,
            });

            let leaving = data[i + 1 - n];
            sum -= leaving;
            tss -= leaving * leaving;
        }

        Ok(Self { n, k, points })
    }

    /// Computes the indicator over the adjusted closes of `chart`.
    pub fn from_chart(chart: &Chart, n: usize, k: f64) -> Result<Self> {
        Self::compute(n, k, chart.timestamps(), chart.adjcloses())
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series was shorter than the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Upper band values.
    pub fn upper(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(BandPoint::upper)
    }

    /// Lower band values.
    pub fn lower(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(BandPoint::lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{mean, stddev};

    fn series(len: usize) -> (Vec<i64>, Vec<f64>) {
        let ts = (0..len as i64).map(|i| 1_704_205_800 + i * 86_400).collect();
        let data = (0..len)
            .map(|i| 100.0 + 5.0 * (i as f64 / 3.0).sin() + (i % 7) as f64)
            .collect();
        (ts, data)
    }

    #[test]
    fn test_point_count() {
        let (ts, data) = series(30);
        for (n, expected) in [(2, 29), (20, 11), (30, 1), (31, 0), (50, 0)] {
            let b = Bollinger::compute(n, 2.0, &ts, &data).unwrap();
            assert_eq!(b.len(), expected, "window {n}");
        }
    }

    #[test]
    fn test_points_match_direct_recomputation() {
        let (ts, data) = series(60);
        let n = 20;
        let b = Bollinger::compute(n, 2.0, &ts, &data).unwrap();

        for (j, point) in b.points.iter().enumerate() {
            let slice = &data[j..j + n];
            assert_eq!(point.timestamp, ts[j + n - 1]);
            assert!((point.mean - mean(slice)).abs() < 1e-9);
            assert!((point.stddev - stddev(slice)).abs() < 1e-6);
            assert!((point.band - 2.0 * point.stddev).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bands() {
        let ts = [1, 2, 3];
        let b = Bollinger::compute(2, 1.5, &ts, &[10.0, 12.0, 12.0]).unwrap();
        assert_eq!(b.len(), 2);
        let sd = 2.0_f64.sqrt();
        assert!((b.points[0].upper() - (11.0 + 1.5 * sd)).abs() < 1e-12);
        assert!((b.points[0].lower() - (11.0 - 1.5 * sd)).abs() < 1e-12);
        assert_eq!(b.points[1].stddev, 0.0);
        assert_eq!(b.upper().count(), 2);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(Bollinger::compute(1, 2.0, &[1], &[1.0]).is_err());
        assert!(Bollinger::compute(2, 2.0, &[1], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_from_chart_uses_valid_prefix() {
        let mut chart = Chart::with_capacity(8);
        chart.count = 4;
        chart.timestamp[..4].copy_from_slice(&[1, 2, 3, 4]);
        chart.adjclose[..4].copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);

        let b = Bollinger::from_chart(&chart, 2, 2.0).unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.points[2].timestamp, 4);
        assert_eq!(b.points[2].mean, 3.5);
    }
}
