//! Panel orchestration: one symbol input in, one terminal outcome out.
//!
//! Each panel runs `Fetching -> {Rendered | ErrorDisplayed}` exactly once per
//! user action; a panel nobody has asked for yet simply has no outcome. Query validation happens before any fetch, and the
//! two panels of a view run concurrently without sharing state.

use serde::Serialize;
use time::Date;
use tracing::{debug, info, info_span, Instrument};

use crate::error::{FetchError, FetchErrorKind};
use crate::fetcher::MarketDataFetcher;
use crate::normalizer::{normalize_latest, normalize_range};
use crate::{
    BarSeries, BarSize, DateRange, IntervalSelection, SeriesQuery, Symbol, ValidationError,
};

pub const ENTER_SYMBOL_HINT: &str = "Enter a symbol to view data.";
pub const INVALID_RANGE_MESSAGE: &str = "From Date must be on or before To Date.";
pub const CHART_CAPTION: &str = "Candlestick shows OHLC per selected interval.";

/// The fetch a panel performs: latest and range are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelQuery {
    Latest,
    Range { range: DateRange, bar_size: BarSize },
}

impl PanelQuery {
    /// Real-time ignores both dates; historical intervals require a valid range.
    pub fn from_inputs(
        selection: IntervalSelection,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Self, FetchError> {
        let Some(bar_size) = selection.bar_size() else {
            return Ok(Self::Latest);
        };

        let (Some(from), Some(to)) = (from, to) else {
            return Err(FetchError::invalid_date_range(
                ValidationError::MissingDate.to_string(),
            ));
        };
        let range = DateRange::new(from, to)
            .map_err(|_| FetchError::invalid_date_range(INVALID_RANGE_MESSAGE))?;

        Ok(Self::Range { range, bar_size })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Fetching,
    Rendered,
    ErrorDisplayed,
}

/// Everything the renderer needs for a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPanel {
    pub heading: String,
    pub title: String,
    pub caption: String,
    pub series: BarSeries,
}

impl RenderedPanel {
    fn new(series: BarSeries) -> Self {
        let symbol = series.symbol().as_str().to_owned();
        let heading = match series.query() {
            SeriesQuery::Latest => {
                format!("{symbol} (latest: {})", series.last().ts)
            }
            SeriesQuery::Range { range, .. } => format!("{symbol} ({range})"),
        };

        Self {
            heading,
            title: format!("{symbol} Candlestick"),
            caption: String::from(CHART_CAPTION),
            series,
        }
    }
}

/// Terminal result of one panel pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOutcome {
    /// Blank symbol: nothing was fetched.
    Hint(String),
    Rendered(RenderedPanel),
    /// Valid response with no bars.
    NoData(String),
    Error(FetchError),
}

impl PanelOutcome {
    pub fn state(&self) -> PanelState {
        match self {
            Self::Rendered(_) => PanelState::Rendered,
            Self::Hint(_) | Self::NoData(_) | Self::Error(_) => PanelState::ErrorDisplayed,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Fetch and normalize one panel. Never fails past this boundary: every
/// failure becomes a [`PanelOutcome`].
pub async fn load_panel(
    fetcher: &MarketDataFetcher,
    symbol_input: &str,
    query: &PanelQuery,
) -> PanelOutcome {
    if Symbol::is_blank_input(symbol_input) {
        return PanelOutcome::Hint(String::from(ENTER_SYMBOL_HINT));
    }

    let symbol = match Symbol::parse(symbol_input) {
        Ok(symbol) => symbol,
        Err(error) => return PanelOutcome::Error(FetchError::invalid_symbol(&error)),
    };

    debug!(symbol = %symbol, state = ?PanelState::Fetching, "panel transition");
    let result = match query {
        PanelQuery::Latest => fetcher
            .fetch_latest(&symbol)
            .await
            .and_then(|payload| normalize_latest(&symbol, &payload)),
        PanelQuery::Range { range, bar_size } => fetcher
            .fetch_range(&symbol, range, *bar_size)
            .await
            .and_then(|payload| normalize_range(&symbol, *range, *bar_size, &payload)),
    };

    match result {
        Ok(series) => {
            info!(symbol = %symbol, bars = series.len(), "panel rendered");
            PanelOutcome::Rendered(RenderedPanel::new(series))
        }
        Err(error) if error.kind() == FetchErrorKind::EmptyResult => {
            info!(symbol = %symbol, "panel has no data");
            PanelOutcome::NoData(error.message().to_owned())
        }
        Err(error) => PanelOutcome::Error(error),
    }
}

/// Raw inputs for the two-panel view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub symbols: [String; 2],
    pub interval: String,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl ViewRequest {
    pub fn new(
        symbol1: impl Into<String>,
        symbol2: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            symbols: [symbol1.into(), symbol2.into()],
            interval: interval.into(),
            from: None,
            to: None,
        }
    }

    pub fn with_dates(mut self, from: Date, to: Date) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

/// Validate the shared interval and dates, then load both panels
/// concurrently. Invalid input is rejected before any network call.
pub async fn load_view(
    fetcher: &MarketDataFetcher,
    request: &ViewRequest,
) -> Result<[PanelOutcome; 2], FetchError> {
    let selection = request
        .interval
        .parse::<IntervalSelection>()
        .map_err(|_| FetchError::invalid_interval(&request.interval))?;
    let query = PanelQuery::from_inputs(selection, request.from, request.to)?;

    let [first, second] = &request.symbols;
    let (first, second) = tokio::join!(
        load_panel(fetcher, first, &query).instrument(info_span!("panel", index = 1)),
        load_panel(fetcher, second, &query).instrument(info_span!("panel", index = 2)),
    );

    Ok([first, second])
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn real_time_ignores_dates_even_when_reversed() {
        let query = PanelQuery::from_inputs(
            IntervalSelection::RealTime,
            Some(date!(2024 - 01 - 02)),
            Some(date!(2024 - 01 - 01)),
        )
        .expect("real-time never consults dates");
        assert_eq!(query, PanelQuery::Latest);
    }

    #[test]
    fn historical_interval_requires_both_dates() {
        let err = PanelQuery::from_inputs(IntervalSelection::OneHour, Some(date!(2024 - 01 - 01)), None)
            .expect_err("must fail");
        assert_eq!(err.kind(), FetchErrorKind::InvalidDateRange);
    }

    #[test]
    fn reversed_range_uses_user_facing_message() {
        let err = PanelQuery::from_inputs(
            IntervalSelection::FiveMinutes,
            Some(date!(2023 - 11 - 29)),
            Some(date!(2023 - 11 - 28)),
        )
        .expect_err("must fail");
        assert_eq!(err.message(), INVALID_RANGE_MESSAGE);
    }

    #[test]
    fn outcome_states_follow_panel_machine() {
        assert_eq!(
            PanelOutcome::Hint(String::new()).state(),
            PanelState::ErrorDisplayed
        );
        assert_eq!(
            PanelOutcome::NoData(String::new()).state(),
            PanelState::ErrorDisplayed
        );
        assert_eq!(
            PanelOutcome::Error(FetchError::status(500)).state(),
            PanelState::ErrorDisplayed
        );
    }
}
