//! Record trait for entities stored in the symbol cache.
//!
//! Every cached entity is a fixed-shape record keyed by its [`Symbol`]. The
//! cache keeps at most one record per ([`RecordKind`], symbol) pair.
//!
//! [`Symbol`]: crate::types::Symbol

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of record held by the symbol cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    /// [`Quote`](crate::Quote) records.
    Quote,
    /// [`QuoteSummary`](crate::QuoteSummary) records.
    QuoteSummary,
    /// [`Chart`](crate::Chart) records.
    Chart,
    /// [`OptionChain`](crate::OptionChain) records.
    OptionChain,
    /// [`Headlines`](crate::Headlines) records.
    Headlines,
}

impl RecordKind {
    /// All record kinds, in cache table order.
    pub const ALL: [Self; 5] = [
        Self::Quote,
        Self::QuoteSummary,
        Self::Chart,
        Self::OptionChain,
        Self::Headlines,
    ];

    /// Returns a short lowercase name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::QuoteSummary => "quote_summary",
            Self::Chart => "chart",
            Self::OptionChain => "option_chain",
            Self::Headlines => "headlines",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity record that can be stored in the symbol cache.
///
/// `Default` must produce the zero-valued record the cache allocates for a key
/// that has never been populated.
pub trait Record: Default + Clone + fmt::Debug + Send + Sync + 'static {
    /// The kind of this record.
    const KIND: RecordKind;

    /// The symbol this record was decoded for (empty until populated).
    fn symbol(&self) -> &str;
}
