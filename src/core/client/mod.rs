//! `BelugaClient` and its builder. Internals live in `constants` (UA + default hosts), `retry` (policy) and `cache`.

mod cache;
mod constants;
mod retry;

pub use cache::CachedBody;
pub use retry::{Backoff, CacheMode, RetryConfig};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use crate::core::{BelugaError, KeyPlacement, Upstream};
use cache::CacheStore;
use constants::{
    DEFAULT_BASE_COINGECKO, DEFAULT_BASE_COINGECKO_PRO, DEFAULT_BASE_DEXSCREENER,
    DEFAULT_BASE_GNEWS, DEFAULT_BASE_KAIKO, DEFAULT_BASE_MORALIS, DEFAULT_SANITY_API_VERSION,
    DEFAULT_SANITY_DATASET, SANITY_API_HOST, SANITY_CDN_HOST, USER_AGENT,
};

/// Sanity project coordinates.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Project id (the subdomain of the API host).
    pub project_id: String,
    /// Dataset name, usually `production`.
    pub dataset: String,
    /// Dated API version without the leading `v`.
    pub api_version: String,
}

/// Shared client for every upstream. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BelugaClient {
    http: Client,
    bases: HashMap<Upstream, Url>,
    keys: HashMap<Upstream, String>,
    coingecko_pro: bool,
    sanity: Option<SanityConfig>,
    retry: RetryConfig,
    cache: Option<Arc<CacheStore>>,
}

impl BelugaClient {
    /// Create a new builder.
    pub fn builder() -> BelugaClientBuilder {
        BelugaClientBuilder::default()
    }

    /* -------- getters used by the API modules and the proxy -------- */

    /// The base URL requests to `upstream` are joined onto.
    ///
    /// # Errors
    ///
    /// Sanity has no default host; without a project id or an explicit base this is a
    /// `BelugaError::Config`.
    pub fn base_url(&self, upstream: Upstream) -> Result<&Url, BelugaError> {
        self.bases.get(&upstream).ok_or_else(|| {
            BelugaError::Config(format!("no base URL configured for {upstream}"))
        })
    }

    /// The configured key for `upstream`, if any.
    pub fn api_key(&self, upstream: Upstream) -> Option<&str> {
        self.keys.get(&upstream).map(String::as_str)
    }

    /// Sanity project coordinates, if configured.
    pub fn sanity(&self) -> Option<&SanityConfig> {
        self.sanity.as_ref()
    }

    /// The client-wide retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Build an authorized GET for `upstream`. The key (if any) is added here and only here.
    pub(crate) fn get(&self, upstream: Upstream, mut url: Url) -> Result<RequestBuilder, BelugaError> {
        let key = self.api_key(upstream);
        if key.is_none() && upstream.requires_key() {
            return Err(BelugaError::MissingApiKey(upstream));
        }

        let placement = upstream.key_placement(self.coingecko_pro);
        if let (KeyPlacement::Query(param), Some(k)) = (placement, key) {
            url.query_pairs_mut().append_pair(param, k);
        }

        let mut req = self.http.get(url).header("accept", "application/json");
        match (placement, key) {
            (KeyPlacement::Header(name), Some(k)) => req = req.header(name, k),
            (KeyPlacement::Bearer, Some(k)) => req = req.bearer_auth(k),
            _ => {}
        }
        Ok(req)
    }

    /// Send a request, retrying on the statuses and transport failures the policy names.
    ///
    /// Requests with streaming bodies cannot be cloned and are sent once.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<Response, BelugaError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        if !cfg.enabled {
            return Ok(req.send().await?);
        }

        let mut attempt = 0;
        loop {
            let Some(this_try) = req.try_clone() else {
                return Ok(req.send().await?);
            };

            match this_try.send().await {
                Ok(resp)
                    if attempt < cfg.max_retries
                        && cfg.should_retry_status(resp.status().as_u16()) =>
                {
                    debug!(status = resp.status().as_u16(), url = %resp.url(), attempt, "retrying on status");
                }
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < cfg.max_retries && cfg.should_retry_error(&e) => {
                    debug!(error = %e, attempt, "retrying on transport error");
                }
                Err(e) => return Err(e.into()),
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<CachedBody> {
        self.cache.as_ref()?.get(url.as_str()).await
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: CachedBody, ttl_override: Option<Duration>) {
        if let Some(store) = &self.cache {
            store.put(url.as_str(), body, ttl_override).await;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct BelugaClientBuilder {
    user_agent: Option<String>,
    bases: HashMap<Upstream, Url>,
    keys: HashMap<Upstream, String>,
    coingecko_pro: bool,
    sanity_project: Option<String>,
    sanity_dataset: Option<String>,
    sanity_api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    cache_ttl: Option<Duration>,
}

impl BelugaClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the base URL for one upstream (tests point these at a mock server).
    #[must_use]
    pub fn base_url(mut self, upstream: Upstream, mut url: Url) -> Self {
        // `Url::join` replaces the last segment unless the base ends in a slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.bases.insert(upstream, url);
        self
    }

    /// Set the API key for one upstream. Empty keys are ignored.
    #[must_use]
    pub fn api_key(mut self, upstream: Upstream, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.keys.insert(upstream, key);
        }
        self
    }

    /// Use the CoinGecko pro host and header.
    #[must_use]
    pub const fn coingecko_pro(mut self, yes: bool) -> Self {
        self.coingecko_pro = yes;
        self
    }

    /// Sanity project id; derives the API host unless a Sanity base URL was given.
    #[must_use]
    pub fn sanity_project(mut self, id: impl Into<String>) -> Self {
        self.sanity_project = Some(id.into());
        self
    }

    /// Sanity dataset. Default: `production`.
    #[must_use]
    pub fn sanity_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.sanity_dataset = Some(dataset.into());
        self
    }

    /// Sanity API version, e.g. `2024-01-01`.
    #[must_use]
    pub fn sanity_api_version(mut self, version: impl Into<String>) -> Self {
        self.sanity_api_version = Some(version.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Shorthand for turning retries on or off.
    #[must_use]
    pub fn retry_enabled(mut self, yes: bool) -> Self {
        let mut cfg = self.retry.take().unwrap_or_default();
        cfg.enabled = yes;
        self.retry = Some(cfg);
        self
    }

    /// Enable in-memory caching with a default TTL.
    /// If not set, caching is disabled.
    #[must_use]
    pub const fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    pub fn build(self) -> Result<BelugaClient, BelugaError> {
        let mut bases = self.bases;
        let defaults = [
            (
                Upstream::CoinGecko,
                if self.coingecko_pro {
                    DEFAULT_BASE_COINGECKO_PRO
                } else {
                    DEFAULT_BASE_COINGECKO
                },
            ),
            (Upstream::DexScreener, DEFAULT_BASE_DEXSCREENER),
            (Upstream::GNews, DEFAULT_BASE_GNEWS),
            (Upstream::Moralis, DEFAULT_BASE_MORALIS),
            (Upstream::Kaiko, DEFAULT_BASE_KAIKO),
        ];
        for (upstream, default) in defaults {
            if !bases.contains_key(&upstream) {
                bases.insert(upstream, Url::parse(default)?);
            }
        }

        let sanity = self.sanity_project.map(|project_id| SanityConfig {
            project_id,
            dataset: self
                .sanity_dataset
                .unwrap_or_else(|| DEFAULT_SANITY_DATASET.to_string()),
            api_version: self
                .sanity_api_version
                .unwrap_or_else(|| DEFAULT_SANITY_API_VERSION.to_string()),
        });

        if let Some(cfg) = &sanity
            && !bases.contains_key(&Upstream::Sanity)
        {
            // Authenticated reads must skip the CDN to see drafts and private datasets.
            let host = if self.keys.contains_key(&Upstream::Sanity) {
                SANITY_API_HOST
            } else {
                SANITY_CDN_HOST
            };
            bases.insert(
                Upstream::Sanity,
                Url::parse(&format!("https://{}.{host}/", cfg.project_id))?,
            );
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(BelugaClient {
            http,
            bases,
            keys: self.keys,
            coingecko_pro: self.coingecko_pro,
            sanity,
            retry: self.retry.unwrap_or_default(),
            cache: self.cache_ttl.map(|ttl| Arc::new(CacheStore::new(ttl))),
        })
    }
}
