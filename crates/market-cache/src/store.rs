//! The cache store and its per-kind tables.

use std::collections::HashMap;
use std::sync::Arc;

use market_core::{
    Chart, Headlines, OptionChain, Quote, QuoteSummary, Record, RecordKind, Symbol,
};
use parking_lot::RwLock;
use tracing::{debug, instrument, trace, warn};

/// A shared handle to a cached record.
///
/// The handle stays valid across refreshes: a refresh rewrites the record
/// behind the lock instead of replacing the handle.
pub type Shared<T> = Arc<RwLock<T>>;

/// The map of one record kind, keyed by symbol.
#[derive(Debug)]
pub struct Table<T> {
    map: RwLock<HashMap<Symbol, Shared<T>>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Record> Table<T> {
    fn get(&self, symbol: &Symbol) -> Option<Shared<T>> {
        self.map.read().get(symbol).cloned()
    }

    fn get_or_create(&self, symbol: &Symbol) -> Shared<T> {
        if let Some(record) = self.get(symbol) {
            return record;
        }

        // Another writer may have inserted between the two locks; the entry
        // API keeps the first insertion.
        let mut map = self.map.write();
        map.entry(symbol.clone())
            .or_insert_with(|| {
                debug!(kind = %T::KIND, symbol = %symbol, "Allocating cache record");
                Arc::new(RwLock::new(T::default()))
            })
            .clone()
    }

    fn snapshot(&self) -> Vec<(Symbol, Shared<T>)> {
        let mut entries: Vec<_> = self
            .map
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    fn len(&self) -> usize {
        self.map.read().len()
    }

    fn contains(&self, symbol: &Symbol) -> bool {
        self.map.read().contains_key(symbol)
    }
}

/// Records that have a table in the [`CacheStore`].
pub trait Cached: Record {
    /// Returns the table holding records of this kind.
    fn table(store: &CacheStore) -> &Table<Self>;
}

impl Cached for Quote {
    fn table(store: &CacheStore) -> &Table<Self> {
        &store.quotes
    }
}

impl Cached for QuoteSummary {
    fn table(store: &CacheStore) -> &Table<Self> {
        &store.summaries
    }
}

impl Cached for Chart {
    fn table(store: &CacheStore) -> &Table<Self> {
        &store.charts
    }
}

impl Cached for OptionChain {
    fn table(store: &CacheStore) -> &Table<Self> {
        &store.option_chains
    }
}

impl Cached for Headlines {
    fn table(store: &CacheStore) -> &Table<Self> {
        &store.headlines
    }
}

/// Symbol-keyed store of decoded records.
///
/// Holds at most one record per ([`RecordKind`], [`Symbol`]). Entries are
/// allocated on first access and live until the store is dropped; there is no
/// eviction. Reads (`get`, `for_each`) are safe while another thread refreshes
/// records.
#[derive(Debug, Default)]
pub struct CacheStore {
    quotes: Table<Quote>,
    summaries: Table<QuoteSummary>,
    charts: Table<Chart>,
    option_chains: Table<OptionChain>,
    headlines: Table<Headlines>,
}

impl CacheStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `symbol`, allocating a zero-valued one if absent.
    ///
    /// Two calls for the same key always return the same handle.
    #[instrument(skip(self), fields(kind = %T::KIND, symbol = %symbol))]
    pub fn get_or_create<T: Cached>(&self, symbol: &Symbol) -> Shared<T> {
        T::table(self).get_or_create(symbol)
    }

    /// Returns the record for `symbol` without allocating.
    #[instrument(skip(self), fields(kind = %T::KIND, symbol = %symbol))]
    pub fn get<T: Cached>(&self, symbol: &Symbol) -> Option<Shared<T>> {
        let record = T::table(self).get(symbol);
        match record {
            Some(_) => trace!("Cache hit"),
            None => trace!("Cache miss"),
        }
        record
    }

    /// Applies `f` to a read view of the record for `symbol`, if present.
    pub fn read<T: Cached, R>(&self, symbol: &Symbol, f: impl FnOnce(&T) -> R) -> Option<R> {
        T::table(self).get(symbol).map(|record| f(&record.read()))
    }

    /// Returns a copy of the record for `symbol`, if present.
    #[must_use]
    pub fn cloned<T: Cached>(&self, symbol: &Symbol) -> Option<T> {
        self.read(symbol, T::clone)
    }

    /// Applies `f` to a write view of the record for `symbol`, allocating it
    /// if absent.
    pub fn update<T: Cached, R>(&self, symbol: &Symbol, f: impl FnOnce(&mut T) -> R) -> R {
        let record = self.get_or_create::<T>(symbol);
        let mut guard = record.write();
        f(&mut guard)
    }

    /// Replaces the contents of the record for `symbol` with `record`.
    ///
    /// The cached handle is kept, so earlier `get_or_create` callers observe
    /// the new contents.
    #[instrument(skip(self, record), fields(kind = %T::KIND, symbol = %symbol))]
    pub fn replace<T: Cached>(&self, symbol: &Symbol, record: T) -> Shared<T> {
        if record.symbol() != symbol.as_str() {
            warn!(
                decoded = record.symbol(),
                "Decoded record symbol differs from cache key"
            );
        }

        let shared = self.get_or_create::<T>(symbol);
        *shared.write() = record;
        debug!("Replaced cache record");
        shared
    }

    /// Visits every record of kind `T`, in symbol order.
    ///
    /// Iterates a snapshot of the table taken up front; records inserted
    /// during iteration are not visited, and each record is read-locked only
    /// while it is being visited.
    pub fn for_each<T: Cached>(&self, mut visitor: impl FnMut(&Symbol, &T)) {
        for (symbol, record) in T::table(self).snapshot() {
            visitor(&symbol, &record.read());
        }
    }

    /// Symbols that have a record of kind `T`, sorted.
    #[must_use]
    pub fn symbols<T: Cached>(&self) -> Vec<Symbol> {
        T::table(self)
            .snapshot()
            .into_iter()
            .map(|(symbol, _)| symbol)
            .collect()
    }

    /// Returns true if a record of `kind` exists for `symbol`.
    #[must_use]
    pub fn contains(&self, kind: RecordKind, symbol: &Symbol) -> bool {
        match kind {
            RecordKind::Quote => self.quotes.contains(symbol),
            RecordKind::QuoteSummary => self.summaries.contains(symbol),
            RecordKind::Chart => self.charts.contains(symbol),
            RecordKind::OptionChain => self.option_chains.contains(symbol),
            RecordKind::Headlines => self.headlines.contains(symbol),
        }
    }

    /// Number of records of `kind`.
    #[must_use]
    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Quote => self.quotes.len(),
            RecordKind::QuoteSummary => self.summaries.len(),
            RecordKind::Chart => self.charts.len(),
            RecordKind::OptionChain => self.option_chains.len(),
            RecordKind::Headlines => self.headlines.len(),
        }
    }

    /// Returns true if the store holds no record of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        RecordKind::ALL.iter().all(|&kind| self.len(kind) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_or_create_returns_same_record() {
        let store = CacheStore::new();
        let symbol = Symbol::new("GME");

        let a = store.get_or_create::<Quote>(&symbol);
        let b = store.get_or_create::<Quote>(&symbol);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(RecordKind::Quote), 1);
    }

    #[test]
    fn test_get_does_not_allocate() {
        let store = CacheStore::new();
        let symbol = Symbol::new("GME");

        assert!(store.get::<Chart>(&symbol).is_none());
        assert!(!store.contains(RecordKind::Chart, &symbol));
        assert!(store.is_empty());
    }

    #[test]
    fn test_kinds_are_independent() {
        let store = CacheStore::new();
        let symbol = Symbol::new("AAPL");

        store.get_or_create::<Quote>(&symbol);
        assert!(store.contains(RecordKind::Quote, &symbol));
        assert!(!store.contains(RecordKind::Chart, &symbol));
        assert!(store.get::<OptionChain>(&symbol).is_none());
    }

    #[test]
    fn test_replace_keeps_handle() {
        let store = CacheStore::new();
        let symbol = Symbol::new("GME");
        let handle = store.get_or_create::<Quote>(&symbol);

        let quote = Quote {
            symbol: "GME".to_string(),
            regular_market_price: 21.5,
            ..Default::default()
        };
        let replaced = store.replace(&symbol, quote);

        assert!(Arc::ptr_eq(&handle, &replaced));
        assert_eq!(handle.read().regular_market_price, 21.5);
        assert_eq!(
            store.read(&symbol, |q: &Quote| q.regular_market_price),
            Some(21.5)
        );
    }

    #[test]
    fn test_update_allocates_and_writes() {
        let store = CacheStore::new();
        let symbol = Symbol::new("MSFT");

        store.update(&symbol, |q: &mut Quote| q.bid = 1.25);
        let quote: Quote = store.cloned(&symbol).unwrap();
        assert_eq!(quote.bid, 1.25);
    }

    #[test]
    fn test_for_each_in_symbol_order() {
        let store = CacheStore::new();
        for s in ["MSFT", "AAPL", "GME"] {
            store.update(&Symbol::new(s), |q: &mut Quote| q.symbol = s.to_string());
        }

        let mut seen = Vec::new();
        store.for_each(|symbol, q: &Quote| {
            assert_eq!(symbol.as_str(), q.symbol);
            seen.push(symbol.to_string());
        });
        assert_eq!(seen, ["AAPL", "GME", "MSFT"]);
        assert_eq!(store.symbols::<Quote>().len(), 3);
    }

    #[test]
    fn test_concurrent_refresh_and_read() {
        let store = CacheStore::new();
        let symbol = Symbol::new("GME");

        thread::scope(|s| {
            s.spawn(|| {
                for i in 0..500 {
                    let quote = Quote {
                        symbol: "GME".to_string(),
                        bid: f64::from(i),
                        ask: f64::from(i),
                        ..Default::default()
                    };
                    store.replace(&symbol, quote);
                }
            });
            s.spawn(|| {
                for _ in 0..500 {
                    store.for_each(|_, q: &Quote| assert_eq!(q.bid, q.ask));
                    let _ = store.get::<Quote>(&symbol);
                }
            });
        });

        assert_eq!(store.read(&symbol, |q: &Quote| q.bid), Some(499.0));
        assert_eq!(store.len(RecordKind::Quote), 1);
    }
}
