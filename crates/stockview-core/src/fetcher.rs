use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ProviderConfig, RANGE_BAR_LIMIT};
use crate::error::FetchError;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::payload::AggregatesResponse;
use crate::{BarSize, DateRange, Symbol};

/// Outcome of one provider call: the decoded payload or a typed failure.
pub type FetchResult = Result<AggregatesResponse, FetchError>;

/// Issues previous-close and ranged aggregate requests against Polygon.
///
/// Every call is a single GET bounded by the configured timeout. Nothing is
/// retried and nothing is retained between calls.
#[derive(Clone)]
pub struct MarketDataFetcher {
    config: ProviderConfig,
    http_client: Arc<dyn HttpClient>,
}

impl MarketDataFetcher {
    pub fn new(config: ProviderConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn with_reqwest(config: ProviderConfig) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Most recent aggregate (previous close) for `symbol`.
    pub async fn fetch_latest(&self, symbol: &Symbol) -> FetchResult {
        let request = HttpRequest::get(self.latest_url(symbol))
            .with_auth(&HttpAuth::BearerToken(self.config.api_key().to_owned()))
            .with_timeout_ms(self.config.latest_timeout_ms());

        debug!(symbol = %symbol, endpoint = "prev", "requesting latest aggregate");
        self.execute(request, symbol).await
    }

    /// Ascending aggregates for `symbol` between the range's dates, inclusive.
    pub async fn fetch_range(
        &self,
        symbol: &Symbol,
        range: &DateRange,
        bar_size: BarSize,
    ) -> FetchResult {
        let request = HttpRequest::get(self.range_url(symbol, range, bar_size))
            .with_timeout_ms(self.config.range_timeout_ms());

        debug!(
            symbol = %symbol,
            endpoint = "range",
            multiplier = bar_size.multiplier,
            timespan = %bar_size.timespan,
            from = %range.from_iso(),
            to = %range.to_iso(),
            "requesting ranged aggregates"
        );
        self.execute(request, symbol).await
    }

    pub fn latest_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/prev",
            self.config.base_url(),
            symbol.as_str()
        )
    }

    pub fn range_url(&self, symbol: &Symbol, range: &DateRange, bar_size: BarSize) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}?adjusted=true&sort=asc&limit={}&apiKey={}",
            self.config.base_url(),
            symbol.as_str(),
            bar_size.multiplier,
            bar_size.timespan.as_str(),
            range.from_iso(),
            range.to_iso(),
            RANGE_BAR_LIMIT,
            urlencoding::encode(self.config.api_key())
        )
    }

    async fn execute(&self, request: HttpRequest, symbol: &Symbol) -> FetchResult {
        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(symbol = %symbol, timed_out = error.timed_out(), "transport error: {}", error.message());
            FetchError::transport(error.message())
        })?;

        if !response.is_success() {
            warn!(symbol = %symbol, status = response.status, "provider returned non-success status");
            return Err(FetchError::status(response.status));
        }

        let payload = AggregatesResponse::parse(&response.body)?;
        debug!(
            symbol = %symbol,
            records = payload.records().len(),
            status = payload.status.as_deref().unwrap_or("unknown"),
            "aggregates received"
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timespan;

    fn fetcher() -> MarketDataFetcher {
        let config = ProviderConfig::new("k&y=1")
            .expect("valid key")
            .with_base_url("https://example.test");
        MarketDataFetcher::with_reqwest(config)
    }

    #[test]
    fn latest_url_targets_prev_endpoint() {
        let symbol = Symbol::parse("aapl").expect("valid symbol");
        assert_eq!(
            fetcher().latest_url(&symbol),
            "https://example.test/v2/aggs/ticker/AAPL/prev"
        );
    }

    #[test]
    fn range_url_embeds_bar_size_dates_and_encoded_key() {
        let symbol = Symbol::parse("msft").expect("valid symbol");
        let range = DateRange::parse_iso("2023-11-28", "2023-11-29").expect("valid range");
        let url = fetcher().range_url(&symbol, &range, BarSize::new(1, Timespan::Hour));

        assert_eq!(
            url,
            "https://example.test/v2/aggs/ticker/MSFT/range/1/hour/2023-11-28/2023-11-29\
             ?adjusted=true&sort=asc&limit=50000&apiKey=k%26y%3D1"
        );
    }
}
