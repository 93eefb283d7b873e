//! Client configuration.

use serde::{Deserialize, Serialize};

use market_core::WINDOW_LENGTH;

/// Default query host.
pub const QUERY_HOST: &str = "https://query1.finance.yahoo.com";

/// Default headline feed URL.
pub const HEADLINE_URL: &str = "https://feeds.finance.yahoo.com/rss/2.0/headline";

/// User agent for HTTP requests.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default minimum delay between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// HTTP transport settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum delay between two requests in milliseconds. Zero disables it.
    pub rate_limit_ms: u64,
    /// Base URL of the JSON and CSV endpoints.
    pub query_host: String,
    /// URL of the RSS headline feed.
    pub headline_url: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            query_host: QUERY_HOST.to_string(),
            headline_url: HEADLINE_URL.to_string(),
        }
    }
}

/// Decoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Capacity of chart series and option strike windows.
    pub window: usize,
    /// Number of strikes kept on each side of the underlying's price.
    pub strike_half_width: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            window: WINDOW_LENGTH,
            strike_half_width: WINDOW_LENGTH / 2,
        }
    }
}

impl DecodeConfig {
    /// Width of the option strike window.
    #[must_use]
    pub fn strike_width(&self) -> usize {
        self.strike_half_width.saturating_mul(2).min(self.window)
    }
}

/// Complete client configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// HTTP transport settings.
    pub transport: TransportConfig,
    /// Decoder settings.
    pub decode: DecodeConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.transport.timeout_secs, 30);
        assert_eq!(config.decode.window, 64);
        assert_eq!(config.decode.strike_width(), 64);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"decode": {"window": 16}, "transport": {"rate_limit_ms": 0}}"#)
                .unwrap();
        assert_eq!(config.decode.window, 16);
        assert_eq!(config.decode.strike_half_width, 32);
        assert_eq!(config.decode.strike_width(), 16);
        assert_eq!(config.transport.rate_limit_ms, 0);
        assert_eq!(config.transport.query_host, QUERY_HOST);
    }
}
