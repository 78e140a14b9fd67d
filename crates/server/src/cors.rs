//! Cross-origin handling for browser callers

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE, ORIGIN,
    VARY,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Accept, Authorization, Content-Type, X-CSRF-Token";
const EXPOSED_HEADERS: &str = "Link";
// Highest value no major browser ignores
const MAX_AGE_SECS: &str = "3599";

/// Which origins may call the proxy from a browser
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    #[must_use]
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    /// True for a listed origin, or any origin when `*` is listed
    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }

    /// The origin to echo back, if the request's origin is allowed
    ///
    /// Credentials are allowed, so a literal `*` is never sent; the origin is reflected.
    fn allowed_origin(&self, headers: &HeaderMap) -> Option<HeaderValue> {
        let origin = headers.get(ORIGIN)?;
        let allowed = origin.to_str().ok().is_some_and(|o| self.allows(o));
        allowed.then(|| origin.clone())
    }
}

/// Answer preflights and decorate responses for allowed origins
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = policy.allowed_origin(req.headers());

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::OK.into_response();
        if let Some(origin) = origin {
            let headers = resp.headers_mut();
            add_origin_headers(headers, origin);
            headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            headers.insert(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            );
            headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(origin) = origin {
        add_origin_headers(resp.headers_mut(), origin);
    }
    resp
}

fn add_origin_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));
}
