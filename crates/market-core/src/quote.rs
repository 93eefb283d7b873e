//! Quote record.

use serde::{Deserialize, Serialize};

use crate::cache::{Record, RecordKind};

/// A real-time quote for one instrument.
///
/// Field names mirror the service's camelCase members in snake case. Fields the
/// service omits for an asset class (crypto, ETF and option extensions) stay at
/// their zero value.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub ask: f64,
    pub ask_size: i64,
    pub average_analyst_rating: String,
    pub average_daily_volume_10_day: i64,
    pub average_daily_volume_3_month: i64,
    pub bid: f64,
    pub bid_size: i64,
    pub book_value: f64,
    pub currency: String,
    pub display_name: String,
    pub dividend_date: i64,
    pub earnings_timestamp: i64,
    pub earnings_timestamp_end: i64,
    pub earnings_timestamp_start: i64,
    pub eps_current_year: f64,
    pub eps_forward: f64,
    pub eps_trailing_twelve_months: f64,
    pub esg_populated: bool,
    pub exchange: String,
    pub exchange_data_delayed_by: i64,
    pub exchange_timezone_name: String,
    pub exchange_timezone_short_name: String,
    pub fifty_day_average: f64,
    pub fifty_day_average_change: f64,
    pub fifty_day_average_change_percent: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_high_change: f64,
    pub fifty_two_week_high_change_percent: f64,
    pub fifty_two_week_low: f64,
    pub fifty_two_week_low_change: f64,
    pub fifty_two_week_low_change_percent: f64,
    pub fifty_two_week_range: String,
    pub financial_currency: String,
    pub first_trade_date_milliseconds: i64,
    pub forward_pe: f64,
    pub full_exchange_name: String,
    pub gmt_offset_milliseconds: i64,
    pub language: String,
    pub long_name: String,
    pub market: String,
    pub market_cap: i64,
    pub market_state: String,
    pub post_market_change: f64,
    pub post_market_change_percent: f64,
    pub post_market_price: f64,
    pub post_market_time: i64,
    pub pre_market_change: f64,
    pub pre_market_change_percent: f64,
    pub pre_market_price: f64,
    pub pre_market_time: i64,
    pub price_eps_current_year: f64,
    pub price_hint: i64,
    pub price_to_book: f64,
    pub quote_source_name: String,
    pub quote_type: String,
    pub region: String,
    pub regular_market_change: f64,
    pub regular_market_change_percent: f64,
    pub regular_market_day_high: f64,
    pub regular_market_day_low: f64,
    pub regular_market_day_range: String,
    pub regular_market_open: f64,
    pub regular_market_previous_close: f64,
    pub regular_market_price: f64,
    pub regular_market_time: i64,
    pub regular_market_volume: i64,
    pub shares_outstanding: i64,
    pub short_name: String,
    pub source_interval: i64,
    pub symbol: String,
    pub tradeable: bool,
    pub trailing_annual_dividend_rate: f64,
    pub trailing_annual_dividend_yield: f64,
    pub trailing_pe: f64,
    pub triggerable: bool,
    pub two_hundred_day_average: f64,
    pub two_hundred_day_average_change: f64,
    pub two_hundred_day_average_change_percent: f64,

    // CRYPTOCURRENCY
    pub circulating_supply: i64,
    pub from_currency: String,
    pub last_market: String,
    pub start_date: i64,
    pub to_currency: String,
    pub volume_24_hr: i64,
    pub volume_all_currencies: i64,

    // ETF
    pub trailing_three_month_nav_returns: f64,
    pub trailing_three_month_returns: f64,
    pub ytd_return: f64,

    // OPTION
    pub custom_price_alert_confidence: String,
    pub expire_date: i64,
    pub expire_iso_date: String,
    pub open_interest: i64,
    pub strike: f64,
    pub underlying_symbol: String,
}

impl Quote {
    /// Returns true if this quote describes an option contract.
    #[must_use]
    pub fn is_option(&self) -> bool {
        self.quote_type == "OPTION"
    }

    /// Returns the price of the most recent trading session.
    ///
    /// Falls back to the regular market price when the pre/post market price is
    /// not reported.
    #[must_use]
    pub fn session_price(&self) -> f64 {
        match self.market_state.as_str() {
            "PRE" if self.pre_market_price > 0.0 => self.pre_market_price,
            "POST" | "POSTPOST" if self.post_market_price > 0.0 => self.post_market_price,
            _ => self.regular_market_price,
        }
    }
}

impl Record for Quote {
    const KIND: RecordKind = RecordKind::Quote;

    fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_price() {
        let mut quote = Quote {
            regular_market_price: 10.0,
            post_market_price: 11.0,
            market_state: "POST".to_string(),
            ..Default::default()
        };
        assert_eq!(quote.session_price(), 11.0);

        quote.market_state = "REGULAR".to_string();
        assert_eq!(quote.session_price(), 10.0);

        quote.market_state = "PRE".to_string();
        assert_eq!(quote.session_price(), 10.0);
    }
}
