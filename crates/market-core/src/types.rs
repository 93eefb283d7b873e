//! Symbol type and bounded string helpers.
//!
//! Every string field of a record is bounded. Strings longer than the bound are
//! truncated silently on a character boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters kept for short string fields.
pub const STRING_LENGTH: usize = 31;

/// Maximum number of characters kept for long text fields.
pub const TEXT_LENGTH: usize = 127;

/// Default capacity of windowed arrays (chart points, option strikes).
pub const WINDOW_LENGTH: usize = 64;

/// Number of expiration dates kept on an option chain.
pub const EXPIRATION_DATES: usize = 24;

/// Number of quarterly entries kept in summary history groups.
pub const QUARTERLY: usize = 4;

/// Number of top holdings kept for a fund.
pub const HOLDINGS: usize = 10;

/// Number of company officers kept in an asset profile.
pub const COMPANY_OFFICERS: usize = 10;

/// Truncates `s` to at most `max` characters.
#[must_use]
pub fn bounded(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// A trading symbol/ticker.
///
/// Symbols are uppercased and bounded to [`STRING_LENGTH`] characters on
/// creation, so a decoded record symbol always compares equal to the key it
/// was cached under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(bounded(s.into().trim(), STRING_LENGTH).to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_uppercase() {
        let symbol = Symbol::new("gme");
        assert_eq!(symbol.as_str(), "GME");
        assert_eq!(symbol.to_string(), "GME");
    }

    #[test]
    fn test_symbol_is_bounded() {
        let long = "x".repeat(STRING_LENGTH + 10);
        assert_eq!(Symbol::new(long).as_str().len(), STRING_LENGTH);
    }

    #[test]
    fn test_bounded_respects_char_boundaries() {
        assert_eq!(bounded("héllo", 2), "hé");
        assert_eq!(bounded("abc", 10), "abc");
        assert_eq!(bounded("", 3), "");
    }
}
