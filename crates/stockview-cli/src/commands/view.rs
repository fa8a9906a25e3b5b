use std::time::Instant;

use stockview_core::{load_view, MarketDataFetcher, ProviderConfig, ViewRequest};
use time::OffsetDateTime;
use tracing::info;

use crate::cli::ViewArgs;
use crate::error::CliError;
use crate::report::ViewReport;

pub async fn run(args: &ViewArgs, timeout_ms: Option<u64>) -> Result<ViewReport, CliError> {
    let mut config = ProviderConfig::from_env()?;
    if let Some(timeout_ms) = timeout_ms {
        config = config.with_timeouts(timeout_ms, timeout_ms)?;
    }
    let fetcher = MarketDataFetcher::with_reqwest(config);

    let to = args.to.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let request = ViewRequest::new(&args.symbol1, &args.symbol2, &args.interval)
        .with_dates(args.from, to);

    let started = Instant::now();
    let panels = load_view(&fetcher, &request)
        .await
        .map_err(CliError::Rejected)?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let report = ViewReport::new(args.interval.trim(), latency_ms, panels);
    info!(request_id = %report.request_id, latency_ms, "view loaded");
    Ok(report)
}
