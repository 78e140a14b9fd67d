//! Typed options for a single outbound backend request

use bytes::Bytes;
use reqwest::header::{HeaderMap, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, COOKIE};
use reqwest::{Method, Url};

use crate::error::{ClientError, Result};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Inbound headers that are relayed to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub content_type: Option<String>,
    /// Session cookies, read by the backend for its own auth
    pub cookie: Option<String>,
    pub request_id: Option<String>,
}

impl ForwardedHeaders {
    /// Pick the forwarded headers out of an inbound request
    ///
    /// Multiple `Cookie` headers are folded into one, the way HTTP/2 clients may split them.
    #[must_use]
    pub fn from_inbound(headers: &HeaderMap) -> Self {
        let cookies: Vec<&str> = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .collect();

        Self {
            content_type: header_string(headers, CONTENT_TYPE.as_str()),
            cookie: (!cookies.is_empty()).then(|| cookies.join("; ")),
            request_id: header_string(headers, REQUEST_ID_HEADER),
        }
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Outbound `Cache-Control` policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// No header, intermediaries decide
    #[default]
    Default,
    /// Revalidate with the backend before reusing anything
    NoCache,
    /// Never store the request or the response
    NoStore,
}

impl CachePolicy {
    #[must_use]
    pub fn header_value(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::NoCache => Some("no-cache"),
            Self::NoStore => Some("no-store"),
        }
    }
}

/// How the request body is sent relative to the response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Duplex {
    /// The body is fully known before the request starts
    #[default]
    None,
    /// The body is streamed out while the backend response is awaited
    Half,
}

/// Outbound request body
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Buffered(Bytes),
    /// Streamed straight from the inbound request; requires [`Duplex::Half`]
    Streamed(reqwest::Body),
}

impl RequestBody {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Buffered(bytes) => bytes.is_empty(),
            Self::Streamed(_) => false,
        }
    }

    /// The duplex mode this body needs
    #[must_use]
    pub fn duplex(&self) -> Duplex {
        match self {
            Self::Streamed(_) => Duplex::Half,
            Self::Empty | Self::Buffered(_) => Duplex::None,
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self::Buffered(bytes)
    }
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        Self::Buffered(Bytes::from(body))
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(body: Vec<u8>) -> Self {
        Self::Buffered(Bytes::from(body))
    }
}

impl From<reqwest::Body> for RequestBody {
    fn from(body: reqwest::Body) -> Self {
        Self::Streamed(body)
    }
}

/// Everything needed to issue one request to the backend
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: ForwardedHeaders,
    pub body: RequestBody,
    pub cache: CachePolicy,
    pub duplex: Duplex,
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: ForwardedHeaders::default(),
            body: RequestBody::Empty,
            cache: CachePolicy::Default,
            duplex: Duplex::None,
        }
    }

    #[must_use]
    pub fn headers(mut self, headers: ForwardedHeaders) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self
    }

    /// Check the option combination before any I/O happens
    pub fn validate(&self) -> Result<()> {
        if matches!(self.body, RequestBody::Streamed(_)) && self.duplex != Duplex::Half {
            return Err(ClientError::InvalidOptions(
                "a streamed body requires half duplex".to_string(),
            ));
        }

        if !self.body.is_empty() && matches!(self.method, Method::GET | Method::HEAD) {
            return Err(ClientError::InvalidOptions(format!(
                "{} request cannot carry a body",
                self.method
            )));
        }

        Ok(())
    }

    pub(crate) fn into_request(
        self,
        http: &reqwest::Client,
        url: Url,
    ) -> Result<reqwest::RequestBuilder> {
        self.validate()?;

        let mut request = http
            .request(self.method, url)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        if let Some(value) = self.cache.header_value() {
            request = request.header(CACHE_CONTROL, value);
        }
        if let Some(cookie) = self.headers.cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(request_id) = self.headers.request_id {
            request = request.header(REQUEST_ID_HEADER, request_id);
        }

        request = match self.body {
            RequestBody::Empty => request,
            body => {
                let content_type = self
                    .headers
                    .content_type
                    .unwrap_or_else(|| JSON_CONTENT_TYPE.to_string());
                let body = match body {
                    RequestBody::Buffered(bytes) => reqwest::Body::from(bytes),
                    RequestBody::Streamed(stream) => stream,
                    RequestBody::Empty => reqwest::Body::from(Bytes::new()),
                };
                request.header(CONTENT_TYPE, content_type).body(body)
            }
        };

        Ok(request)
    }
}
