//! HTTP element source with an injectable client

use std::time::Duration;

use tracing::debug;

use super::{ElementSource, SourceError};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// Allows mock clients to stand in for the network in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    fn get(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("satpass/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SourceError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| SourceError::Http(format!("Failed to read response: {}", e)))
    }
}

/// Element text fetched from a URL, one request per `fetch`.
pub struct HttpElementSource<C: HttpClient = ReqwestClient> {
    url: String,
    client: C,
}

impl HttpElementSource<ReqwestClient> {
    /// Source backed by a reqwest client with the given timeout.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, SourceError> {
        Ok(Self::with_client(url, ReqwestClient::with_timeout(timeout_secs)?))
    }
}

impl<C: HttpClient> HttpElementSource<C> {
    pub fn with_client(url: impl Into<String>, client: C) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<C: HttpClient> ElementSource for HttpElementSource<C> {
    fn fetch(&self) -> Result<String, SourceError> {
        debug!(url = %self.url, "Fetching element text");
        let body = self.client.get(&self.url)?;
        String::from_utf8(body).map_err(|_| SourceError::InvalidUtf8)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
