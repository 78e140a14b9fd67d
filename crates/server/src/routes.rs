use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use launchpad_client::{ApplicationId, BackendClient, ForwardedHeaders, RequestBody};
use launchpad_core::{CollectionProxy, ItemProxy, ProxyError, Relayed};
use serde_json::json;

use crate::cors::{cors_middleware, CorsPolicy};
use crate::request_id::request_id_middleware;

/// Shared handler state; every field is cheap to clone
#[derive(Debug, Clone)]
pub struct AppState {
    collection: CollectionProxy,
    item: ItemProxy,
    cors: CorsPolicy,
}

impl AppState {
    /// Build both proxies on top of one backend client
    #[must_use]
    pub fn new(client: BackendClient, cors: CorsPolicy) -> Self {
        Self {
            collection: CollectionProxy::new(client.clone()),
            item: ItemProxy::new(client),
            cors,
        }
    }
}

/// The public HTTP surface
pub fn router(state: AppState) -> Router {
    let cors = state.cors.clone();

    Router::new()
        .route("/health", get(health))
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/applications/{id}",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
        .with_state(state)
        .layer(from_fn_with_state(cors, cors_middleware))
        .layer(from_fn(request_id_middleware))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_applications(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let forwarded = ForwardedHeaders::from_inbound(&headers);
    relay_response(state.collection.list(&forwarded).await)
}

async fn create_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let forwarded = ForwardedHeaders::from_inbound(&headers);
    relay_response(state.collection.create(&forwarded, stream_body(body)).await)
}

async fn get_application(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let id = match item_id(path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let forwarded = ForwardedHeaders::from_inbound(&headers);
    relay_response(state.item.get(&id, &forwarded).await)
}

async fn update_application(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let id = match item_id(path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let forwarded = ForwardedHeaders::from_inbound(&headers);
    relay_response(state.item.update(&id, &forwarded, stream_body(body)).await)
}

async fn delete_application(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let id = match item_id(path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let forwarded = ForwardedHeaders::from_inbound(&headers);
    relay_response(state.item.delete(&id, &forwarded).await)
}

/// The `{id}` segment, or a `{error}` 400 when it cannot be decoded
fn item_id(path: Result<Path<String>, PathRejection>) -> Result<ApplicationId, Response> {
    path.map(|Path(id)| ApplicationId::from(id)).map_err(|rejection| {
        relay_response(Err(ProxyError::InvalidRequest(rejection.body_text())))
    })
}

/// Hand the inbound body to the backend as a stream, without buffering it
fn stream_body(body: Body) -> RequestBody {
    RequestBody::Streamed(reqwest::Body::wrap_stream(body.into_data_stream()))
}

/// Backend status and body on success, classified status and `{error}` otherwise
fn relay_response(result: launchpad_core::Result<Relayed>) -> Response {
    match result {
        Ok(Relayed {
            status,
            body: Some(body),
        }) => (status, Json(body)).into_response(),
        Ok(Relayed { status, body: None }) => status.into_response(),
        Err(err) => (err.status(), Json(err.body())).into_response(),
    }
}
