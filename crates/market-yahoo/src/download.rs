//! CSV price history parsing.
//!
//! The download endpoint answers with a header line followed by one row per
//! period:
//!
//! ```text
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2024-05-13,26.34,38.20,24.00,30.45,30.45,187000000
//! ```
//!
//! Failures are reported in-band as a single line that starts with a status
//! number instead of the header, e.g.
//! `404 Not Found: No data found, symbol may be delisted`.

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use market_core::types::{STRING_LENGTH, TEXT_LENGTH, bounded};
use market_core::{HistoryRow, MarketError, Result, ServiceError, Symbol};
use serde::Deserialize;

/// Prefix of the header row.
const HEADER: &str = "Date,";

/// One row as laid out by the download endpoint.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Adj Close")]
    adjclose: f64,
    #[serde(rename = "Volume")]
    volume: i64,
}

impl Row {
    fn into_history(self, symbol: &Symbol) -> HistoryRow {
        HistoryRow {
            symbol: symbol.clone(),
            date: self.date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            adjclose: self.adjclose,
            volume: self.volume,
        }
    }
}

/// Returns the in-band error carried by `body`, if any.
///
/// A body whose first line is neither a status line nor the header row is
/// reported as a service error too.
#[must_use]
pub fn service_error(body: &str) -> Option<ServiceError> {
    let line = body.lines().next().unwrap_or_default().trim();
    if line.starts_with(HEADER) {
        return None;
    }

    let bytes = line.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return Some(ServiceError::new(
            "download",
            "Bad Header",
            bounded(&format!("Unexpected first line: {line}"), TEXT_LENGTH),
        ));
    }

    let (response, rest) = line.split_once(' ').unwrap_or((line, ""));
    let (code, description) = rest.split_once(':').unwrap_or((rest, ""));
    Some(ServiceError::new(
        bounded(response, STRING_LENGTH),
        bounded(code.trim(), STRING_LENGTH),
        bounded(description.trim(), TEXT_LENGTH),
    ))
}

/// Parses a history download for `symbol`.
pub fn parse(symbol: &Symbol, body: &str) -> Result<Vec<HistoryRow>> {
    if let Some(error) = service_error(body) {
        return Err(error.into());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());
    reader
        .deserialize::<Row>()
        .map(|row| row.map(|r| r.into_history(symbol)).map_err(row_error))
        .collect()
}

fn row_error(error: csv::Error) -> MarketError {
    match error.position() {
        Some(pos) => MarketError::Parse(format!("line {}: {error}", pos.line())),
        None => MarketError::Parse(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::ErrorKind;

    const BODY: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n\
        2024-05-13,26.34,38.20,24.00,30.45,30.45,187000000\n\
        2024-05-14,64.83,64.83,37.40,48.75,48.75,208000000\n";

    #[test]
    fn test_parse_rows() {
        let symbol = Symbol::new("GME");
        let rows = parse(&symbol, BODY).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 5, 13).unwrap());
        assert_eq!(rows[0].open, 26.34);
        assert_eq!(rows[1].close, 48.75);
        assert_eq!(rows[1].volume, 208_000_000);
        assert_eq!(rows[1].symbol, symbol);
    }

    #[test]
    fn test_header_only() {
        let rows = parse(&Symbol::new("GME"), "Date,Open,High,Low,Close,Adj Close,Volume\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_in_band_error() {
        let body = "404 Not Found: No data found, symbol may be delisted";
        let err = parse(&Symbol::new("ZZZZ"), body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);

        let service = err.service().unwrap();
        assert_eq!(service.response, "404");
        assert_eq!(service.code, "Not Found");
        assert_eq!(service.description, "No data found, symbol may be delisted");
    }

    #[test]
    fn test_header_is_not_an_error() {
        assert!(service_error(BODY).is_none());
    }

    #[test]
    fn test_missing_header_is_service_error() {
        let symbol = Symbol::new("GME");
        for body in ["<html><body>Will be right back</body></html>", "", "Open,Close\n1,2\n"] {
            let err = parse(&symbol, body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Service, "body {body:?}");
            assert_eq!(err.service().unwrap().code, "Bad Header");
        }
    }

    #[test]
    fn test_blank_lines_and_padding() {
        let body = "Date,Open,High,Low,Close,Adj Close,Volume\n\n 2024-05-13 , 1.5,2,1,1.5,1.5,10\n\n";
        let rows = parse(&Symbol::new("GME"), body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].open, 1.5);
        assert_eq!(rows[0].volume, 10);
    }

    #[test]
    fn test_malformed_row() {
        let body = "Date,Open,High,Low,Close,Adj Close,Volume\n2024-05-13,null,null,null,null,null,null\n";
        let err = parse(&Symbol::new("GME"), body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("line 2"));

        let body = "Date,Open\n2024-05-13,1.0\n";
        assert_eq!(parse(&Symbol::new("GME"), body).unwrap_err().kind(), ErrorKind::Parse);
    }
}
