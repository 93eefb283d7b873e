//! A cache store and a client bundled with the analytics that read from it.

use std::sync::Arc;

use chrono::NaiveDate;
use market_cache::CacheStore;
use market_core::{
    Chart, Headlines, HistoryRow, Interval, OptionChain, Quote, QuoteSummary, Result, Symbol,
};
use market_stats::{Bollinger, CorrelationTable};
use market_yahoo::{ChartRequest, ClientConfig, OptionsRequest, YahooClient};
use tracing::{debug, instrument, warn};

/// One cache store and one client.
///
/// Refresh operations write through the client into the store; the analytics
/// read charts back out of it and never touch the network. The store is
/// shared, so other threads may read records while a refresh is running.
///
/// # Example
///
/// ```rust,no_run
/// use market::{OptionsRequest, Session, Symbol};
///
/// let session = Session::new()?;
/// let gme = Symbol::new("GME");
/// session.refresh_options(&gme, &OptionsRequest::Nearest)?;
///
/// if let Some(chain) = session.option_chain(&gme) {
///     for (strike, call, put) in chain.straddles() {
///         println!("{strike}: {} / {}", call.mid(), put.mid());
///     }
/// }
/// # Ok::<(), market::MarketError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<CacheStore>,
    client: YahooClient,
}

impl Session {
    /// Create a session with an empty store and a default HTTP client.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(YahooClient::new()?))
    }

    /// Create a session with an empty store and an HTTP client built from
    /// `config`.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(YahooClient::with_config(config)?))
    }

    /// Create a session with an empty store around `client`.
    #[must_use]
    pub fn with_client(client: YahooClient) -> Self {
        Self {
            store: Arc::new(CacheStore::new()),
            client,
        }
    }

    /// Replace the store, e.g. to share one store between sessions.
    #[must_use]
    pub fn with_store(mut self, store: Arc<CacheStore>) -> Self {
        self.store = store;
        self
    }

    /// The cache store.
    #[must_use]
    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// The client.
    #[must_use]
    pub const fn client(&self) -> &YahooClient {
        &self.client
    }

    /// Refreshes the quotes of `symbols` in one request.
    pub fn refresh_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Symbol>> {
        self.client.quote(&self.store, symbols)
    }

    /// Refreshes the profile, key statistics and financial data of `symbol`.
    pub fn refresh_summary(&self, symbol: &Symbol) -> Result<()> {
        self.client.quote_summary(&self.store, symbol)
    }

    /// Refreshes the earnings modules of `symbol`.
    pub fn refresh_earnings(&self, symbol: &Symbol) -> Result<()> {
        self.client.earnings(&self.store, symbol)
    }

    /// Refreshes the top holdings of fund `symbol`.
    pub fn refresh_holdings(&self, symbol: &Symbol) -> Result<()> {
        self.client.holdings(&self.store, symbol)
    }

    /// Refreshes the chart of `symbol`.
    pub fn refresh_chart(&self, symbol: &Symbol, request: &ChartRequest) -> Result<()> {
        self.client.chart(&self.store, symbol, request)
    }

    /// Refreshes the quote and then the option chain of `symbol`, so that the
    /// strike window is centered on the current price.
    ///
    /// A failed quote refresh is logged; the chain is then centered on the
    /// previously cached price, if any.
    #[instrument(skip(self, request), fields(symbol = %symbol))]
    pub fn refresh_options(&self, symbol: &Symbol, request: &OptionsRequest) -> Result<()> {
        if let Err(e) = self.client.quote(&self.store, std::slice::from_ref(symbol)) {
            warn!(error = %e, "Quote refresh failed, centering on cached price");
        }
        self.client.options(&self.store, symbol, request)
    }

    /// Refreshes the headline feed of `symbol`.
    pub fn refresh_headlines(&self, symbol: &Symbol) -> Result<usize> {
        self.client.headlines(&self.store, symbol)
    }

    /// Downloads the price history of `symbol`. Nothing is cached.
    pub fn download(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<HistoryRow>> {
        self.client.download(symbol, start, end, interval)
    }

    /// Cached quote of `symbol`.
    #[must_use]
    pub fn quote(&self, symbol: &Symbol) -> Option<Quote> {
        self.store.cloned(symbol)
    }

    /// Cached summary of `symbol`.
    #[must_use]
    pub fn summary(&self, symbol: &Symbol) -> Option<QuoteSummary> {
        self.store.cloned(symbol)
    }

    /// Cached chart of `symbol`.
    #[must_use]
    pub fn chart(&self, symbol: &Symbol) -> Option<Chart> {
        self.store.cloned(symbol)
    }

    /// Cached option chain of `symbol`.
    #[must_use]
    pub fn option_chain(&self, symbol: &Symbol) -> Option<OptionChain> {
        self.store.cloned(symbol)
    }

    /// Cached headlines of `symbol`.
    #[must_use]
    pub fn headlines(&self, symbol: &Symbol) -> Option<Headlines> {
        self.store.cloned(symbol)
    }

    /// Band indicator over the cached chart of `symbol`.
    ///
    /// Returns an empty indicator when no chart is cached or the arguments
    /// are invalid.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub fn bollinger(&self, symbol: &Symbol, n: usize, k: f64) -> Bollinger {
        let Some(result) = self
            .store
            .read(symbol, |chart: &Chart| Bollinger::from_chart(chart, n, k))
        else {
            warn!("No cached chart");
            return Bollinger {
                n,
                k,
                ..Bollinger::default()
            };
        };

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Band indicator not computed");
            Bollinger {
                n,
                k,
                ..Bollinger::default()
            }
        })
    }

    /// Correlation table over the cached charts of `symbols`, regressed
    /// against the first symbol.
    ///
    /// Returns an empty table when any chart is not cached.
    #[instrument(skip(self, symbols), fields(count = symbols.len()))]
    pub fn correlation_table(&self, symbols: &[Symbol]) -> CorrelationTable {
        let mut charts = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.store.cloned::<Chart>(symbol) {
                Some(chart) => charts.push(chart),
                None => {
                    warn!(symbol = %symbol, "No cached chart");
                    return CorrelationTable::default();
                }
            }
        }

        let charts: Vec<&Chart> = charts.iter().collect();
        let table = CorrelationTable::from_charts(&charts);
        debug!(rank = table.rank(), size = table.len(), "Correlation table ready");
        table
    }
}
