mod endpoints;
mod error;
mod models;
mod options;
mod response;

pub use endpoints::ApplicationsEndpoint;
pub use error::{validate_base_url, ClientError, Result};
pub use models::{Application, ApplicationDraft, ApplicationId};
pub use options::{
    CachePolicy, Duplex, ForwardedHeaders, RequestBody, RequestOptions, REQUEST_ID_HEADER,
};
pub use response::BackendResponse;

pub use reqwest::{Method, StatusCode, Url};

use std::time::Duration;
use tracing::{debug, info};

/// Backend client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for a whole request, including reading the response body
    pub timeout: Duration,
    /// Upper bound for establishing the TCP/TLS connection
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP client for the backend service of record
///
/// Cloning is cheap: clones share one connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    http: reqwest::Client,
}

impl BackendClient {
    /// Create a new backend client with default config
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_config(base_url, ClientConfig::default())
    }

    /// Create a new backend client with custom config
    pub fn new_with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ClientError::Builder)?;

        info!(
            "Backend client for {} (timeout: {:?}, connect_timeout: {:?})",
            base_url, config.timeout, config.connect_timeout
        );

        Ok(Self { base_url, http })
    }

    /// Append path segments to the base URL, percent-encoding each one
    #[must_use]
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which validation already rejected
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issue one request and read the full response
    ///
    /// Non-2xx statuses are not errors here; callers decide what they mean.
    pub async fn send(&self, url: Url, options: RequestOptions) -> Result<BackendResponse> {
        debug!(method = %options.method, %url, "Sending backend request");

        let response = options.into_request(&self.http, url)?.send().await?;
        BackendResponse::read(response).await
    }

    /// Get endpoints for application operations
    #[must_use]
    pub fn applications(&self) -> ApplicationsEndpoint<'_> {
        ApplicationsEndpoint::new(self)
    }
}
