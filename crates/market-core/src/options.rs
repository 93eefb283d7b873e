//! Option chain records.

use serde::{Deserialize, Serialize};

use crate::cache::{Record, RecordKind};
use crate::types::{EXPIRATION_DATES, WINDOW_LENGTH};

/// A single call or put contract.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub ask: f64,
    pub bid: f64,
    pub change: f64,
    pub contract_size: String,
    pub contract_symbol: String,
    pub currency: String,
    pub expiration: i64,
    pub implied_volatility: f64,
    pub in_the_money: bool,
    pub last_price: f64,
    pub last_trade_date: i64,
    pub open_interest: i64,
    pub percent_change: f64,
    pub strike: f64,
    pub volume: i64,
}

impl OptionContract {
    /// Returns true if no field of this contract was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contract_symbol.is_empty()
    }

    /// Mid price between bid and ask.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }
}

/// A window of call/put contracts for one expiration of one underlying.
///
/// `strikes` is ascending. `calls[i]` and `puts[i]` are the contracts struck at
/// `strikes[i]`; a strike with no listed contract keeps a zero-valued entry.
/// Only the first [`count`](Self::count) strikes are valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Underlying symbol.
    pub underlying_symbol: String,
    /// Listed expiration dates (epoch seconds), earliest first.
    pub expiration_dates: Vec<i64>,
    /// Number of valid strikes.
    pub count: usize,
    /// Strike window, ascending.
    pub strikes: Vec<f64>,
    /// Expiration of the contracts held.
    pub expiration_date: i64,
    /// Whether mini options are listed.
    pub has_mini_options: bool,
    /// Calls, index-aligned with `strikes`.
    pub calls: Vec<OptionContract>,
    /// Puts, index-aligned with `strikes`.
    pub puts: Vec<OptionContract>,
}

impl Default for OptionChain {
    fn default() -> Self {
        Self::with_capacity(WINDOW_LENGTH)
    }
}

impl OptionChain {
    /// Creates an empty chain holding at most `capacity` strikes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            underlying_symbol: String::new(),
            expiration_dates: vec![0; EXPIRATION_DATES],
            count: 0,
            strikes: vec![0.0; capacity],
            expiration_date: 0,
            has_mini_options: false,
            calls: vec![OptionContract::default(); capacity],
            puts: vec![OptionContract::default(); capacity],
        }
    }

    /// Maximum number of strikes this chain can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.strikes.len()
    }

    /// Valid strikes.
    #[must_use]
    pub fn valid_strikes(&self) -> &[f64] {
        &self.strikes[..self.count]
    }

    /// Populated expiration dates.
    pub fn expirations(&self) -> impl Iterator<Item = i64> + '_ {
        self.expiration_dates.iter().copied().take_while(|&d| d != 0)
    }

    /// Iterates the valid (strike, call, put) straddles.
    pub fn straddles(&self) -> impl Iterator<Item = (f64, &OptionContract, &OptionContract)> {
        self.valid_strikes()
            .iter()
            .zip(&self.calls)
            .zip(&self.puts)
            .map(|((&k, c), p)| (k, c, p))
    }
}

impl Record for OptionChain {
    const KIND: RecordKind = RecordKind::OptionChain;

    fn symbol(&self) -> &str {
        &self.underlying_symbol
    }
}
