use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::Result;

/// Error text taken from a backend body is cut to this many characters
const MAX_ERROR_TEXT_CHARS: usize = 1024;

/// Fully read backend response
#[derive(Debug, Clone)]
pub struct BackendResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: Bytes,
}

impl BackendResponse {
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        Ok(Self::new(status, content_type, body))
    }

    #[must_use]
    pub fn new(status: StatusCode, content_type: Option<String>, body: Bytes) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// True when the body is missing or only whitespace
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Parse the body as JSON; an empty body is `None`
    pub fn json(&self) -> std::result::Result<Option<Value>, serde_json::Error> {
        if self.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&self.body).map(Some)
    }

    /// Body as text for error reporting, lossy and truncated
    #[must_use]
    pub fn text(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let text = text.trim();
        match text.char_indices().nth(MAX_ERROR_TEXT_CHARS) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }
}
