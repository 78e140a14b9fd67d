use axum::body::Body;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use launchpad_client::REQUEST_ID_HEADER;
use tracing::Instrument;
use uuid::Uuid;

const MAX_REQUEST_ID_LEN: usize = 128;

/// Make sure every request carries an `x-request-id`, and echo it on the response
///
/// Handlers read the id from the inbound headers, so it reaches the backend too.
/// Ids that are not visible ASCII are replaced, since they could not be forwarded.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN && v.to_str().is_ok())
        .cloned()
        .unwrap_or_else(generate);

    req.headers_mut().insert(REQUEST_ID_HEADER, id.clone());

    let span = tracing::info_span!(
        "request",
        request_id = id.to_str().unwrap_or_default(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut resp = next.run(req).instrument(span).await;
    resp.headers_mut().insert(REQUEST_ID_HEADER, id);
    resp
}

fn generate() -> HeaderValue {
    // A hyphenated UUID is always a valid header value
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}
