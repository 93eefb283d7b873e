#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/market/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Market data session for quantitative finance.
//!
//! This crate re-exports the records and error types of `market-core`, the
//! [`CacheStore`], the [`YahooClient`] and the analytics engine, and provides
//! a [`Session`] tying them together.
//!
//! # Example
//!
//! ```rust,no_run
//! use market::{ChartRequest, Session, Symbol};
//!
//! fn main() -> market::Result<()> {
//!     let session = Session::new()?;
//!     let symbols = [Symbol::new("GME"), Symbol::new("AMC")];
//!
//!     for symbol in &symbols {
//!         session.refresh_chart(symbol, &ChartRequest::default())?;
//!     }
//!
//!     let bands = session.bollinger(&symbols[0], 20, 2.0);
//!     let table = session.correlation_table(&symbols);
//!     println!("{} band points, r = {:?}", bands.len(), table.correlation);
//!
//!     Ok(())
//! }
//! ```

// Core records and types
pub use market_core::*;

// Cache
pub use market_cache::{CacheStore, Cached, Shared};

// Yahoo Finance client
pub use market_yahoo::{
    ChartRequest, ClientConfig, DecodeConfig, HttpTransport, OptionsRequest, Transport,
    TransportConfig, YahooClient,
};

// Analytics
pub use market_stats::{
    BandPoint, Bollinger, CorrelationTable, Series, SummaryStatistics, correlation, covariance,
};

mod session;
pub use session::Session;
