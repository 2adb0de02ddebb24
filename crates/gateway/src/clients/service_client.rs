//! Pooled HTTP client for one backing service.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use common::{AppError, AppResult};

/// Idle connections kept per upstream host
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Idle connections are dropped after this long
const POOL_IDLE_TIMEOUT_SECONDS: u64 = 90;

/// Build the shared client: pooled, with a per-request timeout.
pub fn build_http_client(timeout_seconds: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECONDS))
        .build()
}

/// Headers that describe a single connection and must not be forwarded.
/// `Host` and `Content-Length` are recomputed for the new hop.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "proxy-connection"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "host"
            | "content-length"
    )
}

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Raw upstream answer relayed by the proxy.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Client bound to one service's base URL.
#[derive(Clone)]
pub struct ServiceClient {
    name: &'static str,
    base_url: String,
    http: reqwest::Client,
}

impl ServiceClient {
    pub fn new(name: &'static str, base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            name,
            base_url,
            http,
        }
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    fn connect_error(&self, err: reqwest::Error) -> AppError {
        warn!(service = self.name, "Upstream request failed: {}", err);
        AppError::upstream(format!("{}: {}", self.name, err))
    }

    /// Relay a request verbatim and return the upstream status, headers and body.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> AppResult<UpstreamResponse> {
        let url = self.url(path_and_query);
        debug!(service = self.name, %method, %url, "Forwarding request");

        let response = self
            .http
            .request(method, &url)
            .headers(forwardable(headers))
            .body(body)
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        let status = response.status();
        let headers = forwardable(response.headers());
        let body = response.bytes().await.map_err(|e| self.connect_error(e))?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }

    /// GET `path` and decode a 200 JSON body.
    ///
    /// Any other status comes back as `AppError::Passthrough` carrying the
    /// upstream status, content type and body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Passthrough {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        response.json::<T>().await.map_err(|e| {
            AppError::internal(format!("Error decoding {} response: {}", self.name, e))
        })
    }

    /// True when `GET /health` answers 200.
    pub async fn is_healthy(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!(service = self.name, "Health probe failed: {}", e);
                false
            }
        }
    }
}
