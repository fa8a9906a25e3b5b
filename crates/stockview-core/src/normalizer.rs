//! Turns decoded aggregate payloads into validated [`BarSeries`].
//!
//! Ranged series are re-checked for ascending order even though the request
//! asks the provider for `sort=asc`; a backwards timestamp is reported as
//! [`FetchErrorKind::InvalidSeries`](crate::FetchErrorKind::InvalidSeries)
//! rather than reordered.

use tracing::warn;

use crate::error::FetchError;
use crate::payload::{AggregateRecord, AggregatesResponse};
use crate::{Bar, BarSeries, BarSize, DateRange, SeriesQuery, Symbol, UtcDateTime, ValidationError};

pub const NO_LATEST_DATA: &str = "No data returned.";
pub const NO_RANGE_DATA: &str = "No data returned for the selected range.";

/// Wrap the first record of a previous-close payload as a one-bar series.
pub fn normalize_latest(
    symbol: &Symbol,
    payload: &AggregatesResponse,
) -> Result<BarSeries, FetchError> {
    let record = payload
        .records()
        .first()
        .ok_or_else(|| FetchError::empty_result(NO_LATEST_DATA))?;

    let bar = normalize_record(record, 0)?;
    BarSeries::new(symbol.clone(), SeriesQuery::Latest, vec![bar]).map_err(series_error)
}

pub fn normalize_range(
    symbol: &Symbol,
    range: DateRange,
    bar_size: BarSize,
    payload: &AggregatesResponse,
) -> Result<BarSeries, FetchError> {
    let records = payload.records();
    if records.is_empty() {
        return Err(FetchError::empty_result(NO_RANGE_DATA));
    }

    let bars = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index))
        .collect::<Result<Vec<_>, _>>()?;

    BarSeries::new(symbol.clone(), SeriesQuery::Range { range, bar_size }, bars)
        .map_err(series_error)
}

fn normalize_record(record: &AggregateRecord, index: usize) -> Result<Bar, FetchError> {
    let build = || -> Result<Bar, ValidationError> {
        let ts = UtcDateTime::from_unix_millis(record.timestamp_ms)?;
        Ok(Bar::new(ts, record.open, record.high, record.low, record.close)?
            .with_volume(record.volume)?
            .with_vwap(record.vwap)?
            .with_trades(record.trades))
    };

    let bar = build()
        .map_err(|error| FetchError::invalid_series(format!("aggregate {index}: {error}")))?;
    if !bar.body_within_range() {
        warn!(index, ts = %bar.ts, "aggregate open/close outside high/low, charting as sent");
    }
    Ok(bar)
}

fn series_error(error: ValidationError) -> FetchError {
    match error {
        ValidationError::EmptySeries => FetchError::empty_result(NO_RANGE_DATA),
        other => FetchError::invalid_series(other.to_string()),
    }
}
