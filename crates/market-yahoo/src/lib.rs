#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/market/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance query client.
//!
//! This crate fetches market data from the Yahoo Finance endpoints and writes
//! it into a [`CacheStore`](market_cache::CacheStore).
//!
//! # Features
//!
//! - Batch quotes, quote summary modules, charts and option chains (JSON)
//! - Price history download (CSV)
//! - Headline feed (RSS)
//! - Bounded decoding: fixed-capacity series windows, truncated strings
//! - Built-in rate limiting (1 request per second by default)
//!
//! # Example
//!
//! ```no_run
//! use market_cache::CacheStore;
//! use market_core::{Chart, Symbol};
//! use market_yahoo::{ChartRequest, YahooClient};
//!
//! # fn example() -> market_core::Result<()> {
//! let client = YahooClient::new()?;
//! let store = CacheStore::new();
//! let symbol = Symbol::new("GME");
//!
//! client.chart(&store, &symbol, &ChartRequest::default())?;
//! let count = store.read(&symbol, |c: &Chart| c.count);
//! println!("Fetched {count:?} points");
//! # Ok(())
//! # }
//! ```

/// The query façade.
pub mod client;
/// Client configuration.
pub mod config;
/// Schema-directed JSON traversal.
pub mod decode;
/// CSV price history parsing.
pub mod download;
/// Response envelope classification.
pub mod envelope;
/// Entity mappers.
pub mod mapper;
/// RSS headline feed parsing.
pub mod rss;
/// Blocking HTTP transport.
pub mod transport;

pub use client::{ChartRequest, OptionsRequest, YahooClient};
pub use config::{ClientConfig, DecodeConfig, TransportConfig};
pub use decode::Node;
pub use transport::{HttpTransport, Transport};
