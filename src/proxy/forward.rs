//! Same-origin passthrough to the upstream REST APIs.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use url::Url;

use crate::core::{BelugaError, KEY_QUERY_PARAMS, RawResponse, Upstream, client::CacheMode};

use super::{error::ProxyError, state::AppState};

/// Header telling the caller whether the body came from the TTL cache.
pub const CACHE_HEADER: HeaderName = HeaderName::from_static("x-beluga-cache");

pub async fn coingecko(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    forward(&state, Upstream::CoinGecko, &path, query.as_deref()).await
}

pub async fn dexscreener(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    forward(&state, Upstream::DexScreener, &path, query.as_deref()).await
}

pub async fn gnews(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    forward(&state, Upstream::GNews, &path, query.as_deref()).await
}

pub async fn sanity(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    forward(&state, Upstream::Sanity, &path, query.as_deref()).await
}

async fn forward(
    state: &AppState,
    upstream: Upstream,
    path: &str,
    query: Option<&str>,
) -> Result<Response, ProxyError> {
    let url = upstream_url(state.client.base_url(upstream)?, path, query)?;
    let raw = state
        .client
        .fetch_raw(upstream, url, CacheMode::Use, None)
        .await?;
    Ok(relay(upstream, raw))
}

/// Joins the caller's path and query onto the upstream base.
///
/// Segments are appended one by one, so the result can never leave the base's host or
/// climb above its path. The query is forwarded as written, minus credential-bearing
/// parameters.
///
/// # Errors
///
/// `ProxyError::BadRequest` for empty, `.` or `..` segments.
pub fn upstream_url(base: &Url, path: &str, query: Option<&str>) -> Result<Url, ProxyError> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
        return Err(ProxyError::BadRequest(format!("invalid upstream path: {path:?}")));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| BelugaError::Config(format!("base URL cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);

    let kept: Vec<&str> = query
        .map(|q| q.split('&').filter(|pair| !pair.is_empty() && !is_key_param(pair)).collect())
        .unwrap_or_default();

    let query = kept.join("&");
    url.set_query((!query.is_empty()).then_some(query.as_str()));
    Ok(url)
}

/// Decodes only the name of a raw `name=value` pair, so encoded spellings of a
/// credential parameter are still caught.
fn is_key_param(pair: &str) -> bool {
    let name = pair.split_once('=').map_or(pair, |(name, _)| name);
    url::form_urlencoded::parse(name.as_bytes())
        .next()
        .is_some_and(|(k, _)| KEY_QUERY_PARAMS.iter().any(|p| k.eq_ignore_ascii_case(p)))
}

/// Successful bodies pass through untouched; failures become a JSON error carrying the
/// upstream status and whatever the upstream said.
pub fn relay(upstream: Upstream, raw: RawResponse) -> Response {
    let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY);

    if raw.is_success() {
        let content_type = raw
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok())
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        let cache = HeaderValue::from_static(if raw.from_cache { "hit" } else { "miss" });

        return (
            status,
            [(CONTENT_TYPE, content_type), (CACHE_HEADER, cache)],
            Body::from(raw.body),
        )
            .into_response();
    }

    let details = serde_json::from_str::<Value>(&raw.body).unwrap_or(Value::String(raw.body));
    let body = json!({
        "error": format!("{upstream} request failed"),
        "status": raw.status,
        "details": details,
    });
    (status, axum::Json(body)).into_response()
}
