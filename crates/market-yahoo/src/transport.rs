//! Blocking HTTP transport.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::sleep;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use market_core::{MarketError, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, instrument, warn};

use crate::config::TransportConfig;

/// Fetches the body of a URL.
///
/// Implementations block until the whole body is received. Anything that
/// prevents a body from being obtained is a [`MarketError::Network`].
pub trait Transport: fmt::Debug + Send + Sync {
    /// Performs a GET request and returns the response body.
    fn get(&self, url: &str) -> Result<String>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// Requests are spaced by at least the configured rate limit.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    rate_limit_ms: u64,
    last_request_time: AtomicU64,
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&TransportConfig::default())
    }

    /// Create a transport from `config`.
    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketError::Local(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            rate_limit_ms: config.rate_limit_ms,
            last_request_time: AtomicU64::new(0),
        })
    }

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Apply rate limiting before making a request.
    fn apply_rate_limit(&self) {
        if self.rate_limit_ms == 0 {
            return;
        }

        let elapsed = Self::now_ms().saturating_sub(self.last_request_time.load(Ordering::Relaxed));
        if elapsed < self.rate_limit_ms {
            let wait_time = self.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time));
        }

        self.last_request_time.store(Self::now_ms(), Ordering::Relaxed);
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self))]
    fn get(&self, url: &str) -> Result<String> {
        self.apply_rate_limit();
        debug!("Fetching");

        let response = self.client.get(url).send().map_err(|e| {
            warn!(error = %e, "Request failed");
            MarketError::Network(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate limited by service");
            return Err(MarketError::Network(format!("HTTP {status}: rate limited")));
        }
        if status.is_server_error() {
            warn!(%status, "Server error");
            return Err(MarketError::Network(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| MarketError::Network(format!("reading body: {e}")))?;

        // Client errors usually carry an error envelope worth decoding.
        if body.trim().is_empty() {
            return Err(MarketError::Network(format!("HTTP {status}: empty response")));
        }
        if !status.is_success() {
            debug!(%status, "Decoding error response body");
        }
        Ok(body)
    }
}
