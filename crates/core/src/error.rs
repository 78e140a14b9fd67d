use launchpad_client::{ClientError, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

/// Why a proxied call did not produce a relayable backend response
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Backend timed out: {0}")]
    Timeout(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// The backend answered with a non-2xx status
    #[error("Backend returned {status}")]
    Backend { status: StatusCode, body: Value },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

impl ProxyError {
    /// Status to answer the caller with
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unreachable(_) | Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Backend { status, .. } => *status,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// JSON body to answer the caller with; always has an `error` field
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Backend { body, .. } => body.clone(),
            other => json!({ "error": other.to_string() }),
        }
    }

    /// The `error` field of [`ProxyError::body`]
    #[must_use]
    pub fn message(&self) -> String {
        match self.body().get("error") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => self.to_string(),
        }
    }
}

impl From<ClientError> for ProxyError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Connect(_) | ClientError::Transport(_) => {
                Self::Unreachable(err.to_string())
            }
            ClientError::Timeout(_) => Self::Timeout(err.to_string()),
            ClientError::Response(_) => Self::InvalidResponse(err.to_string()),
            ClientError::InvalidId(_)
            | ClientError::InvalidOptions(_)
            | ClientError::Builder(_) => Self::InvalidRequest(err.to_string()),
            // Caught when the client is built, but map it sensibly anyway
            ClientError::InvalidBaseUrl(_) => Self::Unreachable(err.to_string()),
        }
    }
}
