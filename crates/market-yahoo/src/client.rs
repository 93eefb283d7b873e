//! The query façade.
//!
//! [`YahooClient`] builds endpoint URLs, fetches them through a
//! [`Transport`], classifies the response and writes decoded records into a
//! [`CacheStore`]. Each operation reports success or the first failure; the
//! decoded records are read back from the store.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use market_cache::CacheStore;
use market_core::{
    Headlines, HistoryRow, Interval, MarketError, Module, Quote, QuoteSummary, Range, Result,
    Symbol,
};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::{ClientConfig, DecodeConfig};
use crate::envelope::{self, ResponseKind};
use crate::mapper;
use crate::transport::{HttpTransport, Transport};
use crate::{download, rss};

const QUOTE_PATH: &str = "v7/finance/quote";
const SUMMARY_PATH: &str = "v10/finance/quoteSummary";
const CHART_PATH: &str = "v8/finance/chart";
const OPTIONS_PATH: &str = "v7/finance/options";
const DOWNLOAD_PATH: &str = "v7/finance/download";

/// Corporate events attached to chart responses.
const CHART_EVENTS: &str = "capitalGain|div|earn|split";

/// Time span of a chart request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartRequest {
    /// A named range ending now.
    Range {
        /// Span of the series.
        range: Range,
        /// Bar interval.
        interval: Interval,
    },
    /// An explicit period in epoch seconds.
    Period {
        /// Start of the period.
        period1: i64,
        /// End of the period.
        period2: i64,
        /// Bar interval.
        interval: Interval,
    },
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self::Range {
            range: Range::default(),
            interval: Interval::default(),
        }
    }
}

impl ChartRequest {
    /// A period covering whole UTC days from `start` through `end`.
    pub fn between(start: NaiveDate, end: NaiveDate, interval: Interval) -> Result<Self> {
        let (period1, period2) = period(start, end)?;
        Ok(Self::Period {
            period1,
            period2,
            interval,
        })
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let (span, interval) = match *self {
            Self::Range { range, interval } => (vec![("range", range.to_string())], interval),
            Self::Period {
                period1,
                period2,
                interval,
            } => (
                vec![("period1", period1.to_string()), ("period2", period2.to_string())],
                interval,
            ),
        };
        let mut query = span;
        query.extend([
            ("interval", interval.to_string()),
            ("events", CHART_EVENTS.to_string()),
            ("includeAdjustedClose", "true".to_string()),
            ("includePrePost", "true".to_string()),
        ]);
        query
    }
}

/// Contract selection of an options request.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OptionsRequest {
    /// The nearest expiration.
    #[default]
    Nearest,
    /// The expiration at the given epoch seconds.
    Expiration(i64),
    /// Every expiration, restricted to one strike.
    Strike(f64),
}

impl OptionsRequest {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("straddle", "false".to_string())];
        match *self {
            Self::Nearest => {}
            Self::Expiration(date) => query.push(("date", date.to_string())),
            Self::Strike(k) => query.extend([
                ("strikeMin", format!("{k:.2}")),
                ("strikeMax", format!("{k:.2}")),
                ("getAllData", "true".to_string()),
            ]),
        }
        query
    }
}

/// Converts whole UTC days to a `(period1, period2)` pair of epoch seconds.
fn period(start: NaiveDate, end: NaiveDate) -> Result<(i64, i64)> {
    if start > end {
        return Err(MarketError::InvalidParameter(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }

    let start_ts = start
        .and_hms_opt(0, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
        .unwrap_or(0);

    let end_ts = end
        .and_hms_opt(23, 59, 59)
        .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
        .unwrap_or(0);

    Ok((start_ts, end_ts))
}

/// Yahoo Finance query client.
///
/// The client holds no decoded state; every operation writes into the
/// [`CacheStore`] it is given.
#[derive(Debug, Clone)]
pub struct YahooClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl YahooClient {
    /// Create a client with default settings over HTTP.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client over HTTP from `config`.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.transport)?;
        Ok(Self {
            transport: Arc::new(transport),
            config,
        })
    }

    /// Create a client with default settings over a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: ClientConfig::default(),
        }
    }

    /// Replace the decoder settings.
    #[must_use]
    pub fn with_decode_config(mut self, decode: DecodeConfig) -> Self {
        self.config.decode = decode;
        self
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, base: &str, path: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| MarketError::InvalidParameter(format!("base URL {base:?}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| MarketError::InvalidParameter(format!("base URL {base:?}")))?
            .pop_if_empty()
            .extend(path.iter().flat_map(|p| p.split('/')));
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k, v.as_str())));
        Ok(url)
    }

    fn query_url(&self, path: &[&str], query: &[(&str, String)]) -> Result<Url> {
        self.url(&self.config.transport.query_host, path, query)
    }

    fn fetch(&self, url: &Url) -> Result<String> {
        debug!(%url, "Query");
        self.transport.get(url.as_str())
    }

    fn fetch_json(&self, url: &Url) -> Result<Value> {
        let body = self.fetch(url)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "Response is not valid JSON");
            MarketError::Parse(e.to_string())
        })
    }

    /// Decodes every result of `doc` into `store`.
    ///
    /// `symbol` keys the records of single-symbol responses; quotes are keyed
    /// by their own `symbol` field. Returns the keys written.
    fn ingest(&self, store: &CacheStore, symbol: &Symbol, doc: &Value) -> Result<Vec<Symbol>> {
        let envelope = envelope::open(doc)?;
        let Some(kind) = envelope.kind else {
            return Ok(Vec::new());
        };

        let decode = self.config.decode;
        let mut written = Vec::with_capacity(envelope.results.len());
        for node in envelope.results {
            match kind {
                ResponseKind::Quote => {
                    let quote = mapper::quote::decode(node);
                    let key = Symbol::new(&quote.symbol);
                    if key.is_empty() {
                        warn!("Quote result without symbol");
                        continue;
                    }
                    store.replace(&key, quote);
                    written.push(key);
                }
                ResponseKind::QuoteSummary => {
                    store.update(symbol, |summary: &mut QuoteSummary| {
                        summary.symbol = symbol.to_string();
                        mapper::summary::apply(node, summary)
                    });
                    written.push(symbol.clone());
                }
                ResponseKind::Chart => {
                    let mut chart = mapper::chart::decode(node, decode.window);
                    if chart.symbol.is_empty() {
                        chart.symbol = symbol.to_string();
                    }
                    store.replace(symbol, chart);
                    written.push(symbol.clone());
                }
                ResponseKind::OptionChain => {
                    let price = store.read(symbol, |q: &Quote| q.regular_market_price);
                    let mut chain =
                        mapper::options::decode(node, price, decode.strike_width());
                    if chain.underlying_symbol.is_empty() {
                        chain.underlying_symbol = symbol.to_string();
                    }
                    store.replace(symbol, chain);
                    written.push(symbol.clone());
                }
            }
        }
        Ok(written)
    }

    /// Refreshes the quotes of `symbols` with one batch request.
    ///
    /// Returns the symbols of the quotes received.
    #[instrument(skip(self, store, symbols), fields(count = symbols.len()))]
    pub fn quote(&self, store: &CacheStore, symbols: &[Symbol]) -> Result<Vec<Symbol>> {
        if symbols.is_empty() {
            return Err(MarketError::InvalidParameter(
                "no symbols to quote".to_string(),
            ));
        }

        let list = symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.query_url(&[QUOTE_PATH], &[("symbols", list)])?;
        let doc = self.fetch_json(&url)?;
        self.ingest(store, &symbols[0], &doc)
    }

    /// Refreshes the profile, key statistics and financial data of `symbol`.
    pub fn quote_summary(&self, store: &CacheStore, symbol: &Symbol) -> Result<()> {
        self.quote_summary_modules(store, symbol, &Module::SUMMARY)
    }

    /// Refreshes the earnings calendar, history and trend of `symbol`.
    pub fn earnings(&self, store: &CacheStore, symbol: &Symbol) -> Result<()> {
        self.quote_summary_modules(store, symbol, &Module::EARNINGS)
    }

    /// Refreshes the top holdings of fund `symbol`.
    pub fn holdings(&self, store: &CacheStore, symbol: &Symbol) -> Result<()> {
        self.quote_summary_modules(store, symbol, &Module::HOLDINGS)
    }

    /// Refreshes the given summary `modules` of `symbol`.
    ///
    /// Groups of modules not requested keep their cached contents.
    #[instrument(skip(self, store, modules), fields(symbol = %symbol))]
    pub fn quote_summary_modules(
        &self,
        store: &CacheStore,
        symbol: &Symbol,
        modules: &[Module],
    ) -> Result<()> {
        if modules.is_empty() {
            return Err(MarketError::InvalidParameter(
                "no summary modules selected".to_string(),
            ));
        }

        let selector = modules
            .iter()
            .map(Module::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.query_url(&[SUMMARY_PATH, symbol.as_str()], &[("modules", selector)])?;
        let doc = self.fetch_json(&url)?;
        self.ingest(store, symbol, &doc).map(drop)
    }

    /// Refreshes the chart of `symbol`.
    #[instrument(skip(self, store), fields(symbol = %symbol))]
    pub fn chart(&self, store: &CacheStore, symbol: &Symbol, request: &ChartRequest) -> Result<()> {
        let mut query = vec![("symbol", symbol.to_string())];
        query.extend(request.query());
        let url = self.query_url(&[CHART_PATH, symbol.as_str()], &query)?;
        let doc = self.fetch_json(&url)?;
        self.ingest(store, symbol, &doc).map(drop)
    }

    /// Refreshes the option chain of `symbol`.
    ///
    /// The strike window is centered on the price of the cached quote of
    /// `symbol`; refresh the quote first to center it on the current price.
    #[instrument(skip(self, store), fields(symbol = %symbol))]
    pub fn options(
        &self,
        store: &CacheStore,
        symbol: &Symbol,
        request: &OptionsRequest,
    ) -> Result<()> {
        let url = self.query_url(&[OPTIONS_PATH, symbol.as_str()], &request.query())?;
        let doc = self.fetch_json(&url)?;
        self.ingest(store, symbol, &doc).map(drop)
    }

    /// Downloads the price history of `symbol` as checked CSV text.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub fn download_raw(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<String> {
        if !interval.is_downloadable() {
            return Err(MarketError::InvalidParameter(format!(
                "interval {interval} is not available for download"
            )));
        }

        let (period1, period2) = period(start, end)?;
        let url = self.query_url(
            &[DOWNLOAD_PATH, symbol.as_str()],
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", interval.to_string()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ],
        )?;
        let body = self.fetch(&url)?;
        if let Some(error) = download::service_error(&body) {
            warn!(%error, "Download reported an error");
            return Err(error.into());
        }
        Ok(body)
    }

    /// Downloads the price history of `symbol`.
    pub fn download(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<HistoryRow>> {
        let body = self.download_raw(symbol, start, end, interval)?;
        download::parse(symbol, &body).inspect_err(|e| warn!(error = %e, "Malformed download"))
    }

    /// Refreshes the headline feed of `symbol`.
    ///
    /// Returns the number of items received.
    #[instrument(skip(self, store), fields(symbol = %symbol))]
    pub fn headlines(&self, store: &CacheStore, symbol: &Symbol) -> Result<usize> {
        let url = self.url(
            &self.config.transport.headline_url,
            &[],
            &[("s", symbol.to_string())],
        )?;
        let body = self.fetch(&url)?;
        let items = rss::parse(&body).inspect_err(|e| warn!(error = %e, "Malformed feed"))?;

        let count = items.len();
        store.replace(
            symbol,
            Headlines {
                symbol: symbol.to_string(),
                items,
            },
        );
        debug!(count, "Headlines refreshed");
        Ok(count)
    }
}
