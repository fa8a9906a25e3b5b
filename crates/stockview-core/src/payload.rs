//! Typed schema for Polygon aggregate responses.
//!
//! Both `/prev` and `/range` answer with the same envelope; `/prev` simply
//! carries a single record. Envelope fields are optional, record price and
//! timestamp fields are required so a malformed body fails decoding instead
//! of surfacing as a missing column later.

use serde::Deserialize;

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregatesResponse {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub adjusted: Option<bool>,
    #[serde(default, rename = "queryCount")]
    pub query_count: Option<u64>,
    #[serde(default, rename = "resultsCount")]
    pub results_count: Option<u64>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<AggregateRecord>>,
}

impl AggregatesResponse {
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(|error| {
            FetchError::decode(format!("failed to decode aggregates response: {error}"))
        })
    }

    /// Records in provider order; `null` and a missing key both read as empty.
    pub fn records(&self) -> &[AggregateRecord] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// One aggregate bar as sent by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregateRecord {
    #[serde(default, rename = "T")]
    pub ticker: Option<String>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    /// Bucket start, milliseconds since the Unix epoch.
    #[serde(rename = "t")]
    pub timestamp_ms: i64,
    #[serde(default, rename = "v")]
    pub volume: Option<f64>,
    #[serde(default, rename = "vw")]
    pub vwap: Option<f64>,
    #[serde(default, rename = "n")]
    pub trades: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchErrorKind;

    #[test]
    fn decodes_previous_close_body() {
        let body = r#"{
            "ticker": "AAPL",
            "queryCount": 1,
            "resultsCount": 1,
            "adjusted": true,
            "results": [{"T": "AAPL", "v": 70790813.0, "vw": 131.6292, "o": 130.465,
                         "c": 130.15, "h": 133.41, "l": 129.89, "t": 1673298000000, "n": 645365}],
            "status": "OK",
            "request_id": "6a7e466379af0a71039d60cc78e72282"
        }"#;

        let payload = AggregatesResponse::parse(body).expect("body decodes");
        assert_eq!(payload.ticker.as_deref(), Some("AAPL"));
        assert_eq!(payload.records().len(), 1);

        let record = &payload.records()[0];
        assert_eq!(record.timestamp_ms, 1_673_298_000_000);
        assert_eq!(record.trades, Some(645_365));
        assert_eq!(record.close, 130.15);
    }

    #[test]
    fn null_and_missing_results_read_as_empty() {
        let missing = AggregatesResponse::parse(r#"{"status":"OK","resultsCount":0}"#).expect("decodes");
        let null = AggregatesResponse::parse(r#"{"status":"OK","results":null}"#).expect("decodes");
        assert!(missing.records().is_empty());
        assert!(null.records().is_empty());
    }

    #[test]
    fn record_without_timestamp_is_a_decode_failure() {
        let err = AggregatesResponse::parse(r#"{"results":[{"o":1,"h":2,"l":0.5,"c":1.5}]}"#)
            .expect_err("must fail");
        assert_eq!(err.kind(), FetchErrorKind::Decode);
    }

    #[test]
    fn non_json_body_is_a_decode_failure() {
        let err = AggregatesResponse::parse("<html>gateway</html>").expect_err("must fail");
        assert_eq!(err.kind(), FetchErrorKind::Decode);
    }
}
