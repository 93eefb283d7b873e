//! Single-pass summary statistics.
//!
//! Moments are accumulated with the online update of Welford and Terriberry,
//! so large price levels do not lose precision to cancellation the way a
//! naive sum-of-squares does. Sample sizes below two yield zero for every
//! dispersion measure.

use serde::{Deserialize, Serialize};

/// Running first through fourth central moments of a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    n: usize,
    m1: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Moments {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            n: 0,
            m1: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
        }
    }

    /// Adds one observation.
    pub fn push(&mut self, x: f64) {
        let n1 = self.n as f64;
        self.n += 1;
        let n = self.n as f64;

        let delta = x - self.m1;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.m1 += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Number of observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.n
    }

    /// Returns true if no observation was added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Sample mean (zero when empty).
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.m1
    }

    /// Sample variance with `n - 1` normalization.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        self.m2 / (self.n - 1) as f64
    }

    /// Sample standard deviation.
    #[must_use]
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Skewness, `sqrt(n) * M3 / M2^1.5`.
    #[must_use]
    pub fn skewness(&self) -> f64 {
        if self.n < 2 || self.m2 <= 0.0 {
            return 0.0;
        }
        (self.n as f64).sqrt() * self.m3 / self.m2.powf(1.5)
    }

    /// Excess kurtosis, `n * M4 / M2^2 - 3`.
    #[must_use]
    pub fn kurtosis(&self) -> f64 {
        if self.n < 2 || self.m2 <= 0.0 {
            return 0.0;
        }
        self.n as f64 * self.m4 / (self.m2 * self.m2) - 3.0
    }
}

impl Extend<f64> for Moments {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.push(x));
    }
}

impl FromIterator<f64> for Moments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = Self::new();
        moments.extend(iter);
        moments
    }
}

/// Running co-moment of paired observations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoMoments {
    n: usize,
    mx: f64,
    my: f64,
    c: f64,
}

impl CoMoments {
    /// Adds one pair.
    pub fn push(&mut self, x: f64, y: f64) {
        self.n += 1;
        let n = self.n as f64;
        let dx = x - self.mx;
        self.mx += dx / n;
        self.my += (y - self.my) / n;
        self.c += dx * (y - self.my);
    }

    /// Sample covariance with `n - 1` normalization.
    #[must_use]
    pub fn covariance(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        self.c / (self.n - 1) as f64
    }
}

/// Sum of `data`.
#[must_use]
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Arithmetic mean of `data` (zero when empty).
#[must_use]
pub fn mean(data: &[f64]) -> f64 {
    data.iter().copied().collect::<Moments>().mean()
}

/// Sample variance of `data`.
#[must_use]
pub fn variance(data: &[f64]) -> f64 {
    data.iter().copied().collect::<Moments>().variance()
}

/// Sample standard deviation of `data`.
#[must_use]
pub fn stddev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample covariance of two equal-length series.
///
/// Extra elements of the longer series are ignored.
#[must_use]
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let mut co = CoMoments::default();
    x.iter().zip(y).for_each(|(&a, &b)| co.push(a, b));
    co.covariance()
}

/// Pearson correlation of two equal-length series.
///
/// Zero when either series has no dispersion.
#[must_use]
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    let denominator = stddev(&x[..n]) * stddev(&y[..n]);
    if n < 2 || denominator == 0.0 {
        return 0.0;
    }
    covariance(x, y) / denominator
}

/// Linearly interpolated quantile of ascending `sorted` at fraction `f`.
fn quantile(sorted: &[f64], f: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let index = f * (len - 1) as f64;
            let lhs = index.floor() as usize;
            let delta = index - lhs as f64;
            if lhs + 1 >= len {
                sorted[len - 1]
            } else {
                (1.0 - delta) * sorted[lhs] + delta * sorted[lhs + 1]
            }
        }
    }
}

/// Descriptive statistics of one series.
///
/// The regression fields describe the series against a reference series and
/// are zero unless computed by a
/// [`CorrelationTable`](crate::table::CorrelationTable).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Sample size.
    pub nsize: usize,
    /// Smallest value.
    pub minimum: f64,
    /// First quartile.
    pub lower_quartile: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub upper_quartile: f64,
    /// Largest value.
    pub maximum: f64,
    /// Mean.
    pub mean: f64,
    /// Sample variance.
    pub variance: f64,
    /// Sample standard deviation.
    pub stddev: f64,
    /// Skewness.
    pub skewness: f64,
    /// Excess kurtosis.
    pub kurtosis: f64,
    /// Covariance with the reference series.
    pub covariance: f64,
    /// Correlation with the reference series.
    pub correlation: f64,
    /// Regression slope on the reference series.
    pub slope: f64,
    /// Regression intercept on the reference series.
    pub intercept: f64,
}

impl SummaryStatistics {
    /// Computes the descriptive statistics of `data`.
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        let moments: Moments = data.iter().copied().collect();

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            nsize: data.len(),
            minimum: sorted.first().copied().unwrap_or_default(),
            lower_quartile: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            upper_quartile: quantile(&sorted, 0.75),
            maximum: sorted.last().copied().unwrap_or_default(),
            mean: moments.mean(),
            variance: moments.variance(),
            stddev: moments.stddev(),
            skewness: moments.skewness(),
            kurtosis: moments.kurtosis(),
            ..Default::default()
        }
    }

    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.upper_quartile - self.lower_quartile
    }
}
