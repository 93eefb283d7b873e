#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/market/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Analytics over market series.
//!
//! Every computation is a pure function of its inputs:
//!
//! - [`SummaryStatistics`] - Online moments, quartiles and regression fields
//! - [`Bollinger`] - Moving average with a standard deviation band
//! - [`CorrelationTable`] - Series aligned on common days, correlated pairwise

/// Moving-average band indicator.
pub mod bollinger;
/// Single-pass summary statistics.
pub mod summary;
/// Multi-series join and correlation table.
pub mod table;

pub use bollinger::{BandPoint, Bollinger};
pub use summary::{
    CoMoments, Moments, SummaryStatistics, correlation, covariance, mean, stddev, sum, variance,
};
pub use table::{CorrelationTable, Series, day_start, intersect};
