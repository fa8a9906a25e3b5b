//! Shared transport double for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use stockview_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, MarketDataFetcher, ProviderConfig,
};

pub const TEST_KEY: &str = "test-key";
pub const TEST_BASE_URL: &str = "https://polygon.test";

type Scripted = Result<HttpResponse, HttpError>;

/// Records every request and answers from scripted routes keyed by URL
/// substring; the first matching route wins.
#[derive(Debug)]
pub struct RecordingHttpClient {
    routes: Vec<(String, Scripted)>,
    fallback: Scripted,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    pub fn answering(fallback: Scripted) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::answering(Ok(HttpResponse::ok_json(body)))
    }

    pub fn status(status: u16) -> Self {
        Self::answering(Ok(HttpResponse::new(status, r#"{"status":"ERROR"}"#)))
    }

    pub fn transport_error(message: &str) -> Self {
        Self::answering(Err(HttpError::new(message)))
    }

    pub fn route(mut self, url_fragment: &str, response: Scripted) -> Self {
        self.routes.push((url_fragment.to_owned(), response));
        self
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded_requests().len()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.fallback.clone());

        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

pub fn fetcher_with(client: Arc<RecordingHttpClient>) -> MarketDataFetcher {
    let config = ProviderConfig::new(TEST_KEY)
        .expect("test key is valid")
        .with_base_url(TEST_BASE_URL);
    MarketDataFetcher::new(config, client)
}

pub fn single_bar_body() -> &'static str {
    r#"{"ticker":"AAPL","status":"OK","resultsCount":1,
        "results":[{"T":"AAPL","o":1,"h":2,"l":0.5,"c":1.5,"t":1700000000000,"v":1000}]}"#
}

pub fn hourly_body() -> &'static str {
    r#"{"ticker":"MSFT","status":"OK","adjusted":true,"queryCount":3,"resultsCount":3,
        "results":[
            {"o":378.1,"h":379.0,"l":377.5,"c":378.6,"t":1701176400000,"v":21000},
            {"o":378.6,"h":380.2,"l":378.2,"c":379.9,"t":1701180000000,"v":18000},
            {"o":379.9,"h":380.0,"l":376.8,"c":377.2,"t":1701183600000,"v":25000}
        ]}"#
}

pub fn empty_body() -> &'static str {
    r#"{"ticker":"ZZZZ","status":"OK","queryCount":0,"resultsCount":0,"results":[]}"#
}
