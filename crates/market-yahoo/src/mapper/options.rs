//! `optionChain` mapper.
//!
//! The service lists every strike of an expiration; only a window of
//! `capacity` strikes centered on the underlying's price is kept. Contracts
//! are then matched to the window by strike in a single forward pass, since
//! both the strike list and the contract lists are ascending.

use std::ops::Range;

use market_core::{OptionChain, OptionContract};

use crate::decode::Node;

/// Decodes one element of `optionChain.result`.
///
/// `price` is the underlying's regular market price, if a quote is cached.
/// Without it the window starts at the lowest strike.
#[must_use]
pub fn decode(node: Node<'_>, price: Option<f64>, capacity: usize) -> OptionChain {
    let mut chain = OptionChain::with_capacity(capacity);
    chain.underlying_symbol = node.string("underlyingSymbol");
    node.fill_window("expirationDates", 0, &mut chain.expiration_dates);

    let strikes = node.get("strikes");
    let window = match price {
        Some(price) => strike_window(strikes, price, capacity),
        None => 0..strikes.len().min(capacity),
    };
    chain.count = node.fill_window("strikes", window.start, &mut chain.strikes);

    let valid = &chain.strikes[..chain.count];
    for option in node.get("options").elements() {
        chain.expiration_date = option.int("expirationDate");
        chain.has_mini_options = option.bool("hasMiniOptions");

        merge_join(option.get("calls"), valid, |i, n| chain.calls[i] = contract(n));
        merge_join(option.get("puts"), valid, |i, n| chain.puts[i] = contract(n));
        merge_join(option.get("straddles"), valid, |i, n| {
            let (call, put) = (n.get("call"), n.get("put"));
            if !call.is_null() {
                chain.calls[i] = contract(call);
            }
            if !put.is_null() {
                chain.puts[i] = contract(put);
            }
        });
    }

    chain
}

/// Returns the window of at most `width` strike indices centered on the first
/// strike above `price`.
///
/// When no strike is above `price` the window ends at the highest strike.
#[must_use]
pub fn strike_window(strikes: Node<'_>, price: f64, width: usize) -> Range<usize> {
    let len = strikes.len();
    let center = strikes
        .elements()
        .position(|k| k.to::<f64>() > price)
        .unwrap_or(len);
    center_window(len, center, width)
}

/// Places a window of `width` indices around `center`, shifted to stay within
/// `0..len`.
#[must_use]
pub fn center_window(len: usize, center: usize, width: usize) -> Range<usize> {
    let width = width.min(len);
    let start = center.saturating_sub(width / 2).min(len - width);
    start..start + width
}

/// Walks an ascending contract list against ascending `strikes`, calling
/// `on_match` with the strike index for every contract whose strike is in the
/// window.
///
/// Each list element and each strike is visited at most once. Returns the
/// number of strikes consumed.
pub fn merge_join<'a>(
    list: Node<'a>,
    strikes: &[f64],
    mut on_match: impl FnMut(usize, Node<'a>),
) -> usize {
    let mut ki = 0;
    for item in list.elements() {
        if ki == strikes.len() {
            break;
        }
        let k = item.float("strike");
        while ki < strikes.len() && strikes[ki] <= k {
            if strikes[ki] == k {
                on_match(ki, item);
            }
            ki += 1;
        }
    }
    ki
}

fn contract(node: Node<'_>) -> OptionContract {
    OptionContract {
        ask: node.float("ask"),
        bid: node.float("bid"),
        change: node.float("change"),
        contract_size: node.string("contractSize"),
        contract_symbol: node.string("contractSymbol"),
        currency: node.string("currency"),
        expiration: node.int("expiration"),
        implied_volatility: node.float("impliedVolatility"),
        in_the_money: node.bool("inTheMoney"),
        last_price: node.float("lastPrice"),
        last_trade_date: node.int("lastTradeDate"),
        open_interest: node.int("openInterest"),
        percent_change: node.float("percentChange"),
        strike: node.float("strike"),
        volume: node.int("volume"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn contract_json(kind: &str, k: f64) -> Value {
        json!({
            "contractSymbol": format!("GME240621{kind}{:08}", (k * 1000.0) as i64),
            "strike": k,
            "bid": k / 10.0,
            "ask": k / 10.0 + 0.05,
            "openInterest": 100,
        })
    }

    /// An option chain result listing `strikes`, with a call at every strike
    /// and a put at every other strike.
    pub(crate) fn option_result(symbol: &str, strikes: &[f64]) -> Value {
        let calls: Vec<Value> = strikes.iter().map(|&k| contract_json("C", k)).collect();
        let puts: Vec<Value> = strikes
            .iter()
            .step_by(2)
            .map(|&k| contract_json("P", k))
            .collect();
        json!({
            "underlyingSymbol": symbol,
            "expirationDates": [1_718_928_000, 1_719_532_800],
            "strikes": strikes,
            "hasMiniOptions": false,
            "quote": {"symbol": symbol, "regularMarketPrice": 21.5},
            "options": [{
                "expirationDate": 1_718_928_000,
                "hasMiniOptions": false,
                "calls": calls,
                "puts": puts,
            }],
        })
    }

    fn strikes(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_center_window_interior() {
        assert_eq!(center_window(100, 50, 10), 45..55);
    }

    #[test]
    fn test_center_window_clamped_low() {
        assert_eq!(center_window(100, 2, 10), 0..10);
    }

    #[test]
    fn test_center_window_clamped_high() {
        assert_eq!(center_window(100, 98, 10), 90..100);
        assert_eq!(center_window(100, 100, 10), 90..100);
    }

    #[test]
    fn test_center_window_shorter_than_width() {
        assert_eq!(center_window(5, 3, 64), 0..5);
        assert_eq!(center_window(0, 0, 64), 0..0);
    }

    #[test]
    fn test_strike_window_contains_first_strike_above_price() {
        let doc = json!({ "strikes": strikes(200) });
        let node = Node::new(&doc).get("strikes");
        for price in [0.5, 10.0, 99.5, 150.2, 199.0, 250.0] {
            let window = strike_window(node, price, 64);
            assert_eq!(window.len(), 64);
            let first_above = strikes(200).iter().position(|&k| k > price);
            if let Some(i) = first_above {
                assert!(window.contains(&i), "price {price} window {window:?}");
            } else {
                assert_eq!(window.end, 200);
            }
        }
    }

    #[test]
    fn test_strike_window_centered_when_unclamped() {
        let doc = json!({ "strikes": strikes(200) });
        let node = Node::new(&doc).get("strikes");
        // Strike k sits at index k - 1, so the first strike above 99.5 is at 99.
        for (price, first_above) in [(40.0, 40), (99.5, 99), (150.2, 150), (167.0, 167)] {
            assert_eq!(
                strike_window(node, price, 64),
                first_above - 32..first_above + 32,
                "price {price}"
            );
        }
        assert_eq!(strike_window(node, 99.5, 10), 94..104);
    }

    #[test]
    fn test_strike_window_clamped_at_bounds() {
        let doc = json!({ "strikes": strikes(200) });
        let node = Node::new(&doc).get("strikes");
        assert_eq!(strike_window(node, 0.5, 64), 0..64);
        assert_eq!(strike_window(node, 10.0, 64), 0..64);
        assert_eq!(strike_window(node, 199.0, 64), 136..200);
        assert_eq!(strike_window(node, 250.0, 64), 136..200);
    }

    #[test]
    fn test_merge_join_aligns_contracts_to_strikes() {
        let doc = json!({
            "calls": [
                {"strike": 5.0, "contractSymbol": "A"},
                {"strike": 7.0, "contractSymbol": "B"},
                {"strike": 8.0, "contractSymbol": "C"},
                {"strike": 12.0, "contractSymbol": "D"},
            ],
        });
        let window = [6.0, 7.0, 8.0, 9.0, 10.0];
        let mut matched = Vec::new();
        let consumed = merge_join(Node::new(&doc).get("calls"), &window, |i, n| {
            matched.push((i, n.string("contractSymbol")));
        });

        assert_eq!(consumed, window.len());
        assert_eq!(matched, [(1, "B".to_string()), (2, "C".to_string())]);
    }

    #[test]
    fn test_merge_join_empty_list() {
        let doc = json!({"calls": []});
        let consumed = merge_join(Node::new(&doc).get("calls"), &[1.0, 2.0], |_, _| {
            unreachable!()
        });
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_decode_windowed_chain() {
        let all = strikes(100);
        let doc = option_result("GME", &all);
        let chain = decode(Node::new(&doc), Some(50.5), 10);

        assert_eq!(chain.underlying_symbol, "GME");
        assert_eq!(chain.count, 10);
        assert!(chain.valid_strikes().contains(&51.0));
        assert!(chain.valid_strikes().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(chain.expirations().count(), 2);
        assert_eq!(chain.expiration_date, 1_718_928_000);

        for (k, call, put) in chain.straddles() {
            assert_eq!(call.strike, k);
            // puts are listed at odd strikes only
            if (k as i64) % 2 == 1 {
                assert_eq!(put.strike, k);
            } else {
                assert!(put.is_empty());
            }
        }
    }

    #[test]
    fn test_decode_without_price_starts_at_lowest_strike() {
        let doc = option_result("GME", &strikes(100));
        let chain = decode(Node::new(&doc), None, 10);
        assert_eq!(chain.valid_strikes()[0], 1.0);
        assert_eq!(chain.count, 10);
    }

    #[test]
    fn test_decode_straddles() {
        let doc = json!({
            "underlyingSymbol": "GME",
            "strikes": [20.0, 21.0, 22.0],
            "options": [{
                "expirationDate": 1_718_928_000,
                "straddles": [
                    {"strike": 20.0, "call": {"strike": 20.0, "contractSymbol": "C20"}},
                    {"strike": 22.0, "call": {"strike": 22.0, "contractSymbol": "C22"},
                                     "put": {"strike": 22.0, "contractSymbol": "P22"}},
                ],
            }],
        });
        let chain = decode(Node::new(&doc), Some(21.5), 64);

        assert_eq!(chain.count, 3);
        assert_eq!(chain.calls[0].contract_symbol, "C20");
        assert!(chain.calls[1].is_empty());
        assert_eq!(chain.puts[2].contract_symbol, "P22");
        assert!(chain.puts[0].is_empty());
    }
}
