use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::core::{
    BelugaClient, BelugaError, Upstream,
    client::{CacheMode, CachedBody, RetryConfig},
    net,
};

/// What an upstream answered, kept verbatim so it can be relayed.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Upstream HTTP status.
    pub status: u16,
    /// Upstream `content-type`, if it sent one.
    pub content_type: Option<String>,
    /// Upstream body.
    pub body: String,
    /// The requested URL before key injection.
    pub url: String,
    /// Whether the body was served from the TTL cache.
    pub from_cache: bool,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success response into the matching error.
    pub fn error_for_status(self) -> Result<Self, BelugaError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(BelugaError::from_status(self.status, self.url))
        }
    }
}

impl BelugaClient {
    /// GET `url` from `upstream` and return whatever came back, success or not.
    ///
    /// Only transport failures and a missing key are errors here. Successful bodies are
    /// cached under the key-free URL according to `cache_mode`.
    ///
    /// # Errors
    ///
    /// `BelugaError::MissingApiKey` when the upstream needs a key and none is configured;
    /// `BelugaError::Http` when the request could not be completed.
    pub async fn fetch_raw(
        &self,
        upstream: Upstream,
        url: Url,
        cache_mode: CacheMode,
        retry_override: Option<&RetryConfig>,
    ) -> Result<RawResponse, BelugaError> {
        if cache_mode == CacheMode::Use
            && let Some(hit) = self.cache_get(&url).await
        {
            debug!(%upstream, url = %url, "cache hit");
            return Ok(RawResponse {
                status: 200,
                content_type: hit.content_type,
                body: hit.body,
                url: url.to_string(),
                from_cache: true,
            });
        }

        let req = self.get(upstream, url.clone())?;
        let resp = self.send_with_retry(req, retry_override).await?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let fixture_key = match url.query() {
            Some(q) => format!("{}?{q}", url.path()),
            None => url.path().to_string(),
        };
        let body = net::get_text(resp, upstream.as_str(), &fixture_key, "json").await?;
        debug!(%upstream, url = %url, status, bytes = body.len(), "upstream responded");

        let raw = RawResponse {
            status,
            content_type,
            body,
            url: url.to_string(),
            from_cache: false,
        };

        if raw.is_success() && cache_mode != CacheMode::Bypass {
            self.cache_put(
                &url,
                CachedBody {
                    body: raw.body.clone(),
                    content_type: raw.content_type.clone(),
                },
                None,
            )
            .await;
        }

        Ok(raw)
    }

    /// GET `url` and decode a successful JSON body into `T`.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        upstream: Upstream,
        url: Url,
        cache_mode: CacheMode,
        retry_override: Option<&RetryConfig>,
    ) -> Result<T, BelugaError> {
        let raw = self
            .fetch_raw(upstream, url, cache_mode, retry_override)
            .await?
            .error_for_status()?;
        serde_json::from_str(&raw.body).map_err(BelugaError::Json)
    }
}
