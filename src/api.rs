//! Order backend API client.
//!
//! Fetches fully-hydrated order records (nested design/item and client
//! associations included) ahead of invoice generation. Generation itself
//! never performs I/O; this module is the only network boundary.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::error::{ApiError, ApiResult};

/// Default timeout for backend requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API key header expected by the backend's request auth.
const API_KEY_HEADER: &str = "X-API-Key";

// ---------------------------------------------------------------------------
// URL normalisation
// ---------------------------------------------------------------------------

/// Normalise the backend base URL:
/// - strip trailing slashes
/// - strip a trailing `/api` segment
/// - ensure a scheme is present (https, or http for localhost)
pub fn normalize_backend_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    // Ensure scheme
    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    // Strip trailing slashes
    while url.ends_with('/') {
        url.pop();
    }

    // Strip trailing /api
    if url.ends_with("/api") {
        url.truncate(url.len() - 4);
    }

    // Strip trailing slashes again (in case "/api/" was present)
    while url.ends_with('/') {
        url.pop();
    }

    url
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn friendly_error(url: &str, err: &reqwest::Error) -> ApiError {
    if err.is_connect() {
        return ApiError::Unreachable(url.to_string());
    }
    if err.is_timeout() {
        return ApiError::Timeout(url.to_string());
    }
    ApiError::Network(err.to_string())
}

fn status_error(status: StatusCode, order_id: &str) -> ApiError {
    match status.as_u16() {
        404 => ApiError::NotFound(order_id.to_string()),
        401 | 403 => ApiError::Status {
            code: status.as_u16(),
            detail: "API key rejected by order backend".to_string(),
        },
        code if code >= 500 => ApiError::Status {
            code,
            detail: "order backend server error".to_string(),
        },
        code => ApiError::Status {
            code,
            detail: "unexpected response from order backend".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Fetch one hydrated order record.
///
/// The `include` query asks the backend to embed design/item and client
/// associations so the generator needs no further joins.
pub async fn fetch_order(
    backend_url: &str,
    api_key: Option<&str>,
    order_id: &str,
) -> ApiResult<Value> {
    let base = normalize_backend_url(backend_url);
    let url = format!("{base}/api/orders/{order_id}?include=designs,items,client");

    let client = Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let mut req = client.get(&url).header("Accept", "application/json");
    if let Some(key) = api_key {
        req = req.header(API_KEY_HEADER, key);
    }

    let resp = req.send().await.map_err(|e| friendly_error(&base, &e))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(status_error(status, order_id));
    }

    let body = resp.text().await.unwrap_or_default();
    let parsed: Value =
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    // Some deployments wrap the record in `{ "data": ... }`.
    Ok(parsed.get("data").cloned().unwrap_or(parsed))
}

/// Fetch several orders, preserving input order. Fails on the first error
/// rather than emitting a partial combined invoice.
pub async fn fetch_orders(
    backend_url: &str,
    api_key: Option<&str>,
    order_ids: &[String],
) -> ApiResult<Vec<Value>> {
    let mut orders = Vec::with_capacity(order_ids.len());
    for order_id in order_ids {
        let order = fetch_order(backend_url, api_key, order_id).await?;
        info!(order_id = %order_id, "order fetched");
        orders.push(order);
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_https_scheme() {
        assert_eq!(
            normalize_backend_url("orders.example.com"),
            "https://orders.example.com"
        );
    }

    #[test]
    fn normalize_uses_http_for_localhost() {
        assert_eq!(
            normalize_backend_url("localhost:3000"),
            "http://localhost:3000"
        );
        assert_eq!(
            normalize_backend_url("127.0.0.1:3000"),
            "http://127.0.0.1:3000"
        );
    }

    #[test]
    fn normalize_strips_trailing_slashes_and_api() {
        assert_eq!(
            normalize_backend_url("https://orders.example.com/api/"),
            "https://orders.example.com"
        );
        assert_eq!(
            normalize_backend_url("https://orders.example.com///"),
            "https://orders.example.com"
        );
    }

    #[test]
    fn status_mapping_distinguishes_not_found() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "o-1"),
            ApiError::NotFound(id) if id == "o-1"
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "o-1"),
            ApiError::Status { code: 401, .. }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "o-1"),
            ApiError::Status { code: 502, .. }
        ));
    }
}
