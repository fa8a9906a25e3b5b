//! # Stockview Core
//!
//! Fetch-and-normalize pipeline behind the two-panel stock viewer.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Provider key, base URL and timeouts |
//! | [`domain`] | Symbols, intervals, date ranges, bars and series |
//! | [`error`] | Validation errors and the typed fetch failure |
//! | [`fetcher`] | Previous-close and ranged aggregate requests |
//! | [`http_client`] | Transport trait and the reqwest implementation |
//! | [`normalizer`] | Payload to ordered [`BarSeries`] conversion |
//! | [`panel`] | Per-panel state machine and the two-panel view |
//! | [`payload`] | Typed provider response schema |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockview_core::{load_view, MarketDataFetcher, PanelOutcome, ProviderConfig, ViewRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = MarketDataFetcher::with_reqwest(ProviderConfig::from_env()?);
//!     let request = ViewRequest::new("AAPL", "MSFT", "Real-time");
//!
//!     for outcome in load_view(&fetcher, &request).await? {
//!         if let PanelOutcome::Rendered(panel) = outcome {
//!             println!("{}: {} bars", panel.heading, panel.series.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ViewRequest ──▶ IntervalSelection + DateRange (rejected before any call)
//!      │
//!      ├── panel 1 ──▶ MarketDataFetcher ──▶ HttpClient ──▶ AggregatesResponse
//!      │                                                        │
//!      └── panel 2 (concurrent, independent)                    ▼
//!                                                  normalizer ──▶ BarSeries
//!                                                                  │
//!                                                                  ▼
//!                                                            PanelOutcome
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod normalizer;
pub mod panel;
pub mod payload;

pub use config::ProviderConfig;

pub use domain::{
    format_iso_date, parse_iso_date, price_bounds, resolve_interval, Bar, BarSeries, BarSize,
    DateRange, IntervalSelection, SeriesQuery, Symbol, Timespan, UtcDateTime,
};

pub use error::{FetchError, FetchErrorKind, ValidationError};

pub use fetcher::{FetchResult, MarketDataFetcher};

pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use normalizer::{normalize_latest, normalize_range};

pub use panel::{
    load_panel, load_view, PanelOutcome, PanelQuery, PanelState, RenderedPanel, ViewRequest,
};

pub use payload::{AggregateRecord, AggregatesResponse};
