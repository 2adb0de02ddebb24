//! Pass-through of the CRUD endpoints to the backing services.

use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
};

use common::{AppError, AppResult};

use crate::clients::ServiceClient;
use crate::state::AppState;

/// Largest request body relayed upstream
const MAX_PROXY_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Upstream path for a gateway URI: the `/api` prefix is removed and the
/// query string kept.
pub fn upstream_path(path_and_query: &str) -> &str {
    match path_and_query.strip_prefix("/api") {
        Some(rest) if rest.starts_with('/') || rest.starts_with('?') => rest,
        Some("") => "/",
        _ => path_and_query,
    }
}

pub async fn proxy_to_products(State(state): State<AppState>, request: Request) -> Response {
    relay(&state.product_client, request).await.into_response()
}

pub async fn proxy_to_inventory(State(state): State<AppState>, request: Request) -> Response {
    relay(&state.inventory_client, request).await.into_response()
}

async fn relay(client: &ServiceClient, request: Request) -> AppResult<Response> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());

    let body = axum::body::to_bytes(body, MAX_PROXY_BODY_BYTES)
        .await
        .map_err(|e| AppError::bad_request(format!("Unreadable request body: {}", e)))?;

    let upstream = client
        .forward(
            parts.method,
            upstream_path(path_and_query),
            &parts.headers,
            body,
        )
        .await?;

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = upstream.headers;
    Ok(response)
}
