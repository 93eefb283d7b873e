//! `quoteResponse` mapper.

use market_core::Quote;

use crate::decode::Node;

/// Decodes one element of `quoteResponse.result`.
#[must_use]
pub fn decode(node: Node<'_>) -> Quote {
    Quote {
        ask: node.float("ask"),
        ask_size: node.int("askSize"),
        average_analyst_rating: node.string("averageAnalystRating"),
        average_daily_volume_10_day: node.int("averageDailyVolume10Day"),
        average_daily_volume_3_month: node.int("averageDailyVolume3Month"),
        bid: node.float("bid"),
        bid_size: node.int("bidSize"),
        book_value: node.float("bookValue"),
        currency: node.string("currency"),
        display_name: node.string("displayName"),
        dividend_date: node.int("dividendDate"),
        earnings_timestamp: node.int("earningsTimestamp"),
        earnings_timestamp_end: node.int("earningsTimestampEnd"),
        earnings_timestamp_start: node.int("earningsTimestampStart"),
        eps_current_year: node.float("epsCurrentYear"),
        eps_forward: node.float("epsForward"),
        eps_trailing_twelve_months: node.float("epsTrailingTwelveMonths"),
        esg_populated: node.bool("esgPopulated"),
        exchange: node.string("exchange"),
        exchange_data_delayed_by: node.int("exchangeDataDelayedBy"),
        exchange_timezone_name: node.string("exchangeTimezoneName"),
        exchange_timezone_short_name: node.string("exchangeTimezoneShortName"),
        fifty_day_average: node.float("fiftyDayAverage"),
        fifty_day_average_change: node.float("fiftyDayAverageChange"),
        fifty_day_average_change_percent: node.float("fiftyDayAverageChangePercent"),
        fifty_two_week_high: node.float("fiftyTwoWeekHigh"),
        fifty_two_week_high_change: node.float("fiftyTwoWeekHighChange"),
        fifty_two_week_high_change_percent: node.float("fiftyTwoWeekHighChangePercent"),
        fifty_two_week_low: node.float("fiftyTwoWeekLow"),
        fifty_two_week_low_change: node.float("fiftyTwoWeekLowChange"),
        fifty_two_week_low_change_percent: node.float("fiftyTwoWeekLowChangePercent"),
        fifty_two_week_range: node.string("fiftyTwoWeekRange"),
        financial_currency: node.string("financialCurrency"),
        first_trade_date_milliseconds: node.int("firstTradeDateMilliseconds"),
        forward_pe: node.float("forwardPE"),
        full_exchange_name: node.string("fullExchangeName"),
        gmt_offset_milliseconds: node.int("gmtOffSetMilliseconds"),
        language: node.string("language"),
        long_name: node.string("longName"),
        market: node.string("market"),
        market_cap: node.int("marketCap"),
        market_state: node.string("marketState"),
        post_market_change: node.float("postMarketChange"),
        post_market_change_percent: node.float("postMarketChangePercent"),
        post_market_price: node.float("postMarketPrice"),
        post_market_time: node.int("postMarketTime"),
        pre_market_change: node.float("preMarketChange"),
        pre_market_change_percent: node.float("preMarketChangePercent"),
        pre_market_price: node.float("preMarketPrice"),
        pre_market_time: node.int("preMarketTime"),
        price_eps_current_year: node.float("priceEpsCurrentYear"),
        price_hint: node.int("priceHint"),
        price_to_book: node.float("priceToBook"),
        quote_source_name: node.string("quoteSourceName"),
        quote_type: node.string("quoteType"),
        region: node.string("region"),
        regular_market_change: node.float("regularMarketChange"),
        regular_market_change_percent: node.float("regularMarketChangePercent"),
        regular_market_day_high: node.float("regularMarketDayHigh"),
        regular_market_day_low: node.float("regularMarketDayLow"),
        regular_market_day_range: node.string("regularMarketDayRange"),
        regular_market_open: node.float("regularMarketOpen"),
        regular_market_previous_close: node.float("regularMarketPreviousClose"),
        regular_market_price: node.float("regularMarketPrice"),
        regular_market_time: node.int("regularMarketTime"),
        regular_market_volume: node.int("regularMarketVolume"),
        shares_outstanding: node.int("sharesOutstanding"),
        short_name: node.string("shortName"),
        source_interval: node.int("sourceInterval"),
        symbol: node.string("symbol"),
        tradeable: node.bool("tradeable"),
        trailing_annual_dividend_rate: node.float("trailingAnnualDividendRate"),
        trailing_annual_dividend_yield: node.float("trailingAnnualDividendYield"),
        trailing_pe: node.float("trailingPE"),
        triggerable: node.bool("triggerable"),
        two_hundred_day_average: node.float("twoHundredDayAverage"),
        two_hundred_day_average_change: node.float("twoHundredDayAverageChange"),
        two_hundred_day_average_change_percent: node.float("twoHundredDayAverageChangePercent"),

        // Cryptocurrency
        circulating_supply: node.int("circulatingSupply"),
        from_currency: node.string("fromCurrency"),
        last_market: node.string("lastMarket"),
        start_date: node.int("startDate"),
        to_currency: node.string("toCurrency"),
        volume_24_hr: node.int("volume24Hr"),
        volume_all_currencies: node.int("volumeAllCurrencies"),

        // ETF
        trailing_three_month_nav_returns: node.float("trailingThreeMonthNavReturns"),
        trailing_three_month_returns: node.float("trailingThreeMonthReturns"),
        ytd_return: node.float("ytdReturn"),

        // Option
        custom_price_alert_confidence: node.string("customPriceAlertConfidence"),
        expire_date: node.int("expireDate"),
        expire_iso_date: node.string("expireIsoDate"),
        open_interest: node.int("openInterest"),
        strike: node.float("strike"),
        underlying_symbol: node.string("underlyingSymbol"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_equity() {
        let doc = json!({
            "symbol": "GME",
            "quoteType": "EQUITY",
            "regularMarketPrice": 21.5,
            "regularMarketVolume": 5_000_000,
            "marketCap": {"raw": 6_500_000_000_i64, "fmt": "6.5B"},
            "gmtOffSetMilliseconds": -14_400_000,
            "tradeable": false,
            "triggerable": true,
            "longName": null,
        });
        let quote = decode(Node::new(&doc));

        assert_eq!(quote.symbol, "GME");
        assert_eq!(quote.quote_type, "EQUITY");
        assert_eq!(quote.regular_market_price, 21.5);
        assert_eq!(quote.regular_market_volume, 5_000_000);
        assert_eq!(quote.market_cap, 6_500_000_000);
        assert_eq!(quote.gmt_offset_milliseconds, -14_400_000);
        assert!(quote.triggerable);
        assert!(quote.long_name.is_empty());
        assert_eq!(quote.strike, 0.0);
    }

    #[test]
    fn test_decode_option_fields() {
        let doc = json!({
            "symbol": "GME240621C00025000",
            "quoteType": "OPTION",
            "strike": 25.0,
            "openInterest": 1200,
            "expireDate": 1_718_928_000,
            "underlyingSymbol": "GME",
        });
        let quote = decode(Node::new(&doc));
        assert!(quote.is_option());
        assert_eq!(quote.underlying_symbol, "GME");
        assert_eq!(quote.open_interest, 1200);
    }
}
