//! # Domain Models
//!
//! Types shared by the fetcher, the normalizer and the panel layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Upper-cased ticker |
//! | [`IntervalSelection`] | Real-time or a historical bar size |
//! | [`BarSize`] | Multiplier/timespan pair used by ranged queries |
//! | [`DateRange`] | Inclusive `from <= to` calendar range |
//! | [`Bar`] | One OHLC aggregate |
//! | [`BarSeries`] | Ordered bars for one symbol and query |
//! | [`UtcDateTime`] | UTC instant built from epoch milliseconds |
//!
//! Every type validates its invariants at construction, so a value that
//! exists is a value the provider request or the renderer can use as-is.

mod date_range;
mod interval;
mod models;
mod symbol;
mod timestamp;

pub use date_range::{format_iso_date, parse_iso_date, DateRange};
pub use interval::{resolve_interval, BarSize, IntervalSelection, Timespan};
pub use models::{price_bounds, Bar, BarSeries, SeriesQuery};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
