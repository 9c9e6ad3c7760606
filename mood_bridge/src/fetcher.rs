//! Quote provider transport.
//!
//! `HttpFetcher` issues exactly one request per call and yields the raw body.
//! Any completed response counts as a success regardless of status: the
//! provider reports unknown symbols with an error-shaped body, which the
//! normalizer rejects later. No retries are attempted.
use log::debug;
use mood_common::MoodError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default quote provider.
pub const DEFAULT_PROVIDER_URL: &str = "http://dev.markitondemand.com";
/// Quote lookup path on the provider.
pub const QUOTE_PATH: &str = "/Api/v2/Quote/json";

/// HTTP methods the fetcher can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A single outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// `None` leaves the request bounded only by the transport.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Future returned by [`HttpFetcher::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, MoodError>> + Send + 'a>>;

/// Transport contract: one request in, raw body or `MoodError::Transport` out.
pub trait HttpFetcher: Send + Sync {
    fn fetch<'a>(&'a self, request: HttpRequest) -> FetchFuture<'a>;
}

/// Builds quote URLs for a provider base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteEndpoint {
    base_url: String,
}

impl QuoteEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET` URL for `symbol`, with the symbol percent-encoded.
    pub fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}{}?symbol={}",
            self.base_url,
            QUOTE_PATH,
            urlencoding::encode(symbol)
        )
    }
}

impl Default for QuoteEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER_URL)
    }
}

/// Production fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, MoodError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mood_bridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MoodError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn fetch<'a>(&'a self, request: HttpRequest) -> FetchFuture<'a> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    MoodError::Transport(format!("request timeout: {}", e))
                } else if e.is_connect() {
                    MoodError::Transport(format!("connection failed: {}", e))
                } else {
                    MoodError::Transport(format!("request failed: {}", e))
                }
            })?;

            debug!("{} answered {}", request.url, response.status());
            response
                .text()
                .await
                .map_err(|e| MoodError::Transport(format!("failed to read response body: {}", e)))
        })
    }
}
