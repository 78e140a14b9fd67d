use reqwest::Url;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Application id '{0}' cannot be used as a path segment")]
    InvalidId(String),

    #[error("Invalid request options: {0}")]
    InvalidOptions(String),

    #[error("Backend unreachable: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("Backend request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Backend transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Backend response could not be read: {0}")]
    Response(#[source] reqwest::Error),

    #[error("Failed to build backend request: {0}")]
    Builder(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts can also report as connect errors, so check them first
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() {
            Self::Connect(err)
        } else if err.is_builder() {
            Self::Builder(err)
        } else if err.is_body() || err.is_decode() {
            Self::Response(err)
        } else {
            Self::Transport(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Validate and parse a backend base URL
pub fn validate_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidBaseUrl(
            "base URL cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{trimmed}: scheme must be http or https"
        )));
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{trimmed}: URL must have a host"
        )));
    }

    // Endpoint paths are appended to the base, a query or fragment would end up in the wrong place
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{trimmed}: base URL cannot carry a query or fragment"
        )));
    }

    Ok(url)
}
