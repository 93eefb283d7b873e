//! Response envelope classification.
//!
//! Every JSON response is a single-member object whose key names the response
//! kind and whose value holds `result` and `error`:
//!
//! ```json
//! {"chart": {"result": [ ... ], "error": null}}
//! ```

use market_core::types::{STRING_LENGTH, bounded};
use market_core::{MarketError, Result, ServiceError};
use serde_json::Value;
use tracing::warn;

use crate::decode::Node;

/// Response kinds with a mapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseKind {
    /// `quoteResponse`: one quote per requested symbol.
    Quote,
    /// `quoteSummary`: requested modules for one symbol.
    QuoteSummary,
    /// `chart`: time series for one symbol.
    Chart,
    /// `optionChain`: contracts for one underlying.
    OptionChain,
}

impl ResponseKind {
    /// Resolves a response kind from its envelope key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quoteResponse" => Some(Self::Quote),
            "quoteSummary" => Some(Self::QuoteSummary),
            "chart" => Some(Self::Chart),
            "optionChain" => Some(Self::OptionChain),
            _ => None,
        }
    }
}

/// A classified response whose results are ready for mapping.
#[derive(Debug)]
pub struct Envelope<'a> {
    /// Envelope key naming the response kind.
    pub name: &'a str,
    /// Mapper for the response, if the kind is known.
    pub kind: Option<ResponseKind>,
    /// Result elements, in response order.
    pub results: Vec<Node<'a>>,
}

/// Classifies a parsed response.
///
/// Returns a service error when the envelope carries a non-null `error`, or
/// when `result` is an empty array. A document that is not an envelope at all
/// is a parse error.
pub fn open(doc: &Value) -> Result<Envelope<'_>> {
    let (name, body) = doc
        .as_object()
        .and_then(|members| members.iter().next())
        .ok_or_else(|| MarketError::Parse("response is not an envelope object".to_string()))?;
    let body = Node::new(body);

    let error = body.get("error");
    if !error.is_null() {
        let error = ServiceError::new(
            bounded(name, STRING_LENGTH),
            error.string("code"),
            error.text("description"),
        );
        warn!(%error, "Service reported an error");
        return Err(error.into());
    }

    let result = body.get("result");
    if !result.is_null() && !result.is_array() {
        return Err(MarketError::Parse(format!("{name}.result is not an array")));
    }
    if result.is_array() && result.is_empty() {
        let error = ServiceError::not_found(bounded(name, STRING_LENGTH));
        warn!(%error, "Service returned no results");
        return Err(error.into());
    }

    let kind = ResponseKind::from_name(name);
    if kind.is_none() {
        warn!(response = %name, "Unknown response kind");
    }

    Ok(Envelope {
        name,
        kind,
        results: result.elements().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_open_chart() {
        let doc = json!({"chart": {"result": [{"meta": {}}], "error": null}});
        let envelope = open(&doc).unwrap();
        assert_eq!(envelope.name, "chart");
        assert_eq!(envelope.kind, Some(ResponseKind::Chart));
        assert_eq!(envelope.results.len(), 1);
    }

    #[test]
    fn test_service_error() {
        let doc = json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"},
            },
        });
        let err = open(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        let service = err.service().unwrap();
        assert_eq!(service.response, "chart");
        assert_eq!(service.code, "Not Found");
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let doc = json!({"quoteResponse": {"result": [], "error": null}});
        let err = open(&doc).unwrap_err();
        assert_eq!(
            err.service(),
            Some(&ServiceError::not_found("quoteResponse"))
        );
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let doc = json!({"finance": {"result": [{}], "error": null}});
        let envelope = open(&doc).unwrap();
        assert_eq!(envelope.kind, None);
        assert_eq!(envelope.results.len(), 1);
    }

    #[test]
    fn test_non_envelope_is_parse_error() {
        for doc in [json!([1, 2]), json!({}), json!("text")] {
            assert_eq!(open(&doc).unwrap_err().kind(), ErrorKind::Parse);
        }
        let doc = json!({"chart": {"result": {"a": 1}}});
        assert_eq!(open(&doc).unwrap_err().kind(), ErrorKind::Parse);
    }
}
