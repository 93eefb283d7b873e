//! `chart` mapper.

use market_core::Chart;
use tracing::warn;

use crate::decode::Node;

/// Decodes one element of `chart.result` into a chart holding at most
/// `capacity` points.
///
/// Every series is read as a right-aligned window so the most recent points
/// are kept. The record is built from scratch, so a shorter response never
/// leaves stale points from an earlier refresh.
#[must_use]
pub fn decode(node: Node<'_>, capacity: usize) -> Chart {
    let mut chart = Chart::with_capacity(capacity);

    let meta = node.get("meta");
    chart.chart_previous_close = meta.float("chartPreviousClose");
    chart.regular_market_price = meta.float("regularMarketPrice");
    chart.symbol = meta.string("symbol");

    chart.count = node.fill_right("timestamp", &mut chart.timestamp);

    let indicators = node.get("indicators");
    let count = chart.count;
    let check = |series: &str, n: usize| {
        if n != count {
            warn!(
                symbol = %chart.symbol,
                series,
                expected = count,
                found = n,
                "Chart series length differs from timestamp count"
            );
        }
    };

    for adjclose in indicators.get("adjclose").elements() {
        let n = adjclose.fill_right("adjclose", &mut chart.adjclose);
        check("adjclose", n);
    }
    for quote in indicators.get("quote").elements() {
        check("close", quote.fill_right("close", &mut chart.close));
        check("high", quote.fill_right("high", &mut chart.high));
        check("low", quote.fill_right("low", &mut chart.low));
        check("open", quote.fill_right("open", &mut chart.open));
        check("volume", quote.fill_right("volume", &mut chart.volume));
    }

    chart
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// A chart result with `n` daily points starting at 2024-01-02.
    pub(crate) fn chart_result(symbol: &str, n: usize) -> Value {
        let start = 1_704_205_800_i64;
        let timestamps: Vec<i64> = (0..n as i64).map(|i| start + i * 86_400).collect();
        let closes: Vec<f64> = (0..n).map(|i| 20.0 + i as f64).collect();
        let volumes: Vec<i64> = (0..n as i64).map(|i| 1_000 + i).collect();
        json!({
            "meta": {
                "symbol": symbol,
                "chartPreviousClose": 19.5,
                "regularMarketPrice": closes.last().copied().unwrap_or_default(),
            },
            "timestamp": timestamps,
            "indicators": {
                "quote": [{
                    "open": closes,
                    "high": closes.iter().map(|c| c + 1.0).collect::<Vec<_>>(),
                    "low": closes.iter().map(|c| c - 1.0).collect::<Vec<_>>(),
                    "close": closes,
                    "volume": volumes,
                }],
                "adjclose": [{"adjclose": closes}],
            },
        })
    }

    #[test]
    fn test_decode_short_series() {
        let doc = chart_result("GME", 5);
        let chart = decode(Node::new(&doc), 64);

        assert_eq!(chart.symbol, "GME");
        assert_eq!(chart.count, 5);
        assert_eq!(chart.capacity(), 64);
        assert_eq!(chart.adjcloses(), [20.0, 21.0, 22.0, 23.0, 24.0]);
        assert_eq!(chart.high[0], 21.0);
        assert_eq!(chart.volume[4], 1_004);
        assert_eq!(chart.regular_market_price, 24.0);
        assert!(chart.timestamp[5..].iter().all(|&t| t == 0));
    }

    #[test]
    fn test_decode_keeps_most_recent_points() {
        let doc = chart_result("GME", 100);
        let chart = decode(Node::new(&doc), 64);

        assert_eq!(chart.count, 64);
        assert_eq!(chart.adjclose[0], 20.0 + 36.0);
        assert_eq!(chart.adjclose[63], 20.0 + 99.0);
        assert!(chart.timestamps().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_decode_missing_indicators() {
        let doc = json!({"meta": {"symbol": "GME"}, "timestamp": [1, 2, 3]});
        let chart = decode(Node::new(&doc), 8);
        assert_eq!(chart.count, 3);
        assert!(chart.close.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_null_points_decode_to_zero() {
        let doc = json!({
            "meta": {"symbol": "GME"},
            "timestamp": [1, 2],
            "indicators": {"quote": [{"close": [null, 5.0]}]},
        });
        let chart = decode(Node::new(&doc), 8);
        assert_eq!(chart.closes(), [0.0, 5.0]);
    }
}
