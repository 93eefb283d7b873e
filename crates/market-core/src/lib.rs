#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/market/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core records and types for market data.
//!
//! This crate provides the foundational abstractions shared by the decoder,
//! the cache and the analytics engine:
//!
//! - [`Symbol`](types::Symbol) - Ticker used as the cache key
//! - [`Record`](cache::Record) - Trait implemented by every cached entity
//! - [`Quote`], [`QuoteSummary`], [`Chart`], [`OptionChain`], [`Headlines`] - Fixed-shape records
//! - [`HistoryRow`] - One row of a CSV history download
//! - [`MarketError`](error::MarketError) - Error taxonomy surfaced to callers

/// Record trait and record kinds for the symbol cache.
pub mod cache;
/// Chart (OHLCV time series) record.
pub mod chart;
/// Error types for market data operations.
pub mod error;
/// Chart interval and range definitions.
pub mod frequency;
/// CSV history rows.
pub mod history;
/// News headline records.
pub mod news;
/// Option chain records.
pub mod options;
/// Quote record.
pub mod quote;
/// Quote summary record and its module groups.
pub mod summary;
/// Symbol type and bounded string helpers.
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{Record, RecordKind};
pub use chart::Chart;
pub use error::{ErrorKind, MarketError, Result, ServiceError};
pub use frequency::{Interval, Range};
pub use history::HistoryRow;
pub use news::{Headline, Headlines};
pub use options::{OptionChain, OptionContract};
pub use quote::Quote;
pub use summary::{
    AssetProfile, CalendarEvents, CompanyOfficer, DefaultKeyStatistics, EarningsEstimate,
    EarningsHistory, EarningsTrend, FinancialData, FinancialsChart, Holding, Module,
    QuoteSummary, RevenueEstimate,
};
pub use types::{
    COMPANY_OFFICERS, EXPIRATION_DATES, HOLDINGS, QUARTERLY, STRING_LENGTH, Symbol, TEXT_LENGTH,
    WINDOW_LENGTH,
};
