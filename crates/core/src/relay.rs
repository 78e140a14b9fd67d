//! Turning a backend response into what the caller gets back

use launchpad_client::{BackendResponse, StatusCode};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{ProxyError, Result};

/// A backend response accepted for relaying
#[derive(Debug, Clone, PartialEq)]
pub struct Relayed {
    /// Backend status, forwarded as is
    pub status: StatusCode,
    /// Backend JSON body; `None` when the backend sent no body
    pub body: Option<Value>,
}

impl Relayed {
    #[must_use]
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

/// Relay a 2xx backend response verbatim, classify anything else
pub fn relay(response: &BackendResponse) -> Result<Relayed> {
    let status = response.status();

    if !status.is_success() {
        return Err(ProxyError::Backend {
            status,
            body: backend_error_body(response),
        });
    }

    response
        .json()
        .map(|body| Relayed::new(status, body))
        .map_err(|e| {
            let content_type = response.content_type().unwrap_or("no content-type");
            ProxyError::InvalidResponse(format!(
                "backend sent a non-JSON body ({content_type}): {e}"
            ))
        })
}

/// Keep a backend error object that already has an `error` field, wrap anything else
fn backend_error_body(response: &BackendResponse) -> Value {
    if let Ok(Some(body)) = response.json() {
        if body.get("error").is_some() {
            return body;
        }
    }

    let text = response.text();
    let message = if text.is_empty() {
        response
            .status()
            .canonical_reason()
            .unwrap_or("backend error")
            .to_string()
    } else {
        text
    };
    json!({ "error": message })
}

/// Relay the outcome of one backend call, logging how it went
pub(crate) fn finish(
    operation: &str,
    outcome: launchpad_client::Result<BackendResponse>,
) -> Result<Relayed> {
    let result = outcome
        .map_err(ProxyError::from)
        .and_then(|response| relay(&response));

    match &result {
        Ok(relayed) => info!(operation, status = %relayed.status, "Relayed backend response"),
        Err(err @ ProxyError::Backend { status, .. }) => {
            warn!(operation, %status, error = %err.message(), "Backend rejected request");
        }
        Err(err) => warn!(operation, status = %err.status(), error = %err, "Proxy call failed"),
    }

    result
}
