use serde::Serialize;

use crate::{BarSize, DateRange, Symbol, UtcDateTime, ValidationError};

/// One OHLC aggregate keyed by its bucket start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<u64>,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
            volume: None,
            vwap: None,
            trades: None,
        })
    }

    pub fn with_volume(mut self, volume: Option<f64>) -> Result<Self, ValidationError> {
        if let Some(value) = volume {
            validate_non_negative("volume", value)?;
        }
        self.volume = volume;
        Ok(self)
    }

    pub fn with_vwap(mut self, vwap: Option<f64>) -> Result<Self, ValidationError> {
        if let Some(value) = vwap {
            validate_non_negative("vwap", value)?;
        }
        self.vwap = vwap;
        Ok(self)
    }

    pub fn with_trades(mut self, trades: Option<u64>) -> Self {
        self.trades = trades;
        self
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// True when open and close both sit inside `[low, high]`. Provider
    /// aggregates occasionally break this and are charted anyway.
    pub fn body_within_range(&self) -> bool {
        let range = self.low..=self.high;
        range.contains(&self.open) && range.contains(&self.close)
    }
}

/// Which provider query produced a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesQuery {
    Latest,
    Range { range: DateRange, bar_size: BarSize },
}

/// Ordered bars for one symbol and one query. Never empty, timestamps never
/// decrease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    symbol: Symbol,
    query: SeriesQuery,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: Symbol, query: SeriesQuery, bars: Vec<Bar>) -> Result<Self, ValidationError> {
        if bars.is_empty() {
            return Err(ValidationError::EmptySeries);
        }
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[1].ts < pair[0].ts)
        {
            return Err(ValidationError::UnorderedSeries { index: index + 1 });
        }

        Ok(Self {
            symbol,
            query,
            bars,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub const fn query(&self) -> SeriesQuery {
        self.query
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

}

/// Lowest and highest price touched by `bars`, open and close included.
pub fn price_bounds(bars: &[Bar]) -> (f64, f64) {
    bars.iter().fold((f64::MAX, f64::MIN), |(low, high), bar| {
        (
            low.min(bar.low).min(bar.open).min(bar.close),
            high.max(bar.high).max(bar.open).max(bar.close),
        )
    })
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_at(millis: i64) -> Bar {
        let ts = UtcDateTime::from_unix_millis(millis).expect("timestamp");
        Bar::new(ts, 10.0, 11.0, 9.5, 10.5).expect("valid bar")
    }

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("valid symbol")
    }

    #[test]
    fn rejects_high_below_low() {
        let ts = UtcDateTime::from_unix_millis(0).expect("timestamp");
        let err = Bar::new(ts, 10.0, 9.0, 9.5, 9.2).expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidBarRange);
    }

    #[test]
    fn keeps_close_outside_high_low() {
        let ts = UtcDateTime::from_unix_millis(0).expect("timestamp");
        let bar = Bar::new(ts, 10.0, 12.0, 9.0, 12.5).expect("provider data is kept");
        assert!(!bar.body_within_range());
    }

    #[test]
    fn rejects_non_finite_prices() {
        let ts = UtcDateTime::from_unix_millis(0).expect("timestamp");
        let err = Bar::new(ts, f64::NAN, 12.0, 9.0, 10.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { field: "open" }));
    }

    #[test]
    fn series_allows_equal_timestamps() {
        let series = BarSeries::new(symbol(), SeriesQuery::Latest, vec![bar_at(1_000), bar_at(1_000)])
            .expect("non-decreasing is fine");
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn series_rejects_backwards_timestamps() {
        let err = BarSeries::new(
            symbol(),
            SeriesQuery::Latest,
            vec![bar_at(1_000), bar_at(3_000), bar_at(2_000)],
        )
        .expect_err("must fail");
        assert_eq!(err, ValidationError::UnorderedSeries { index: 2 });
    }

    #[test]
    fn series_rejects_empty_bars() {
        let err = BarSeries::new(symbol(), SeriesQuery::Latest, Vec::new()).expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySeries);
    }

    #[test]
    fn price_bounds_span_all_bars() {
        let ts = UtcDateTime::from_unix_millis(2_000).expect("timestamp");
        let wide = Bar::new(ts, 10.0, 14.0, 8.0, 12.0).expect("valid bar");
        assert_eq!(price_bounds(&[bar_at(1_000), wide]), (8.0, 14.0));
    }

    #[test]
    fn price_bounds_include_bodies_outside_wicks() {
        let ts = UtcDateTime::from_unix_millis(0).expect("timestamp");
        let bar = Bar::new(ts, 11.02, 11.0, 10.5, 10.8).expect("provider data is kept");
        assert_eq!(price_bounds(&[bar]), (10.5, 11.02));
    }
}
