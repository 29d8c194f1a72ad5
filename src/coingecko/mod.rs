//! CoinGecko market data: the markets table, simple prices, global totals,
//! trending coins and chart series.

mod api;
mod model;
mod wire;

use std::collections::HashMap;

pub use model::{ChartPoint, CoinMarket, GlobalMarket, MarketChart, SimplePrice, TrendingCoin};

use crate::core::{
    BelugaClient, BelugaError,
    client::{CacheMode, RetryConfig},
};

/// Parameters of a `/coins/markets` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketsQuery {
    /// Quote currency, e.g. `usd` or `idr`.
    pub vs_currency: String,
    /// CoinGecko ordering key. Default: `market_cap_desc`.
    pub order: String,
    /// Rows per page, clamped to 1..=250.
    pub per_page: u32,
    /// 1-based page number.
    pub page: u32,
    /// Include the 7-day sparkline.
    pub sparkline: bool,
    /// Comma-separated windows for extra percentage changes. Default: `1h,24h,7d`.
    pub price_change_percentage: String,
    /// Restrict to these coin ids.
    pub ids: Vec<String>,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".into(),
            order: "market_cap_desc".into(),
            per_page: 100,
            page: 1,
            sparkline: false,
            price_change_percentage: "1h,24h,7d".into(),
            ids: Vec::new(),
        }
    }
}

/// Fetches one page of the markets table.
///
/// # Errors
///
/// Returns a `BelugaError` if the request fails, CoinGecko answers with a non-success
/// status, or the body is not a markets array.
#[cfg_attr(feature = "instrument", tracing::instrument(skip(client), err))]
pub async fn markets(
    client: &BelugaClient,
    query: &MarketsQuery,
) -> Result<Vec<CoinMarket>, BelugaError> {
    MarketsBuilder::new(client).query(query.clone()).fetch().await
}

/// Current price, market cap and 24h change for `ids`, keyed by coin id.
///
/// `vs_currencies` is a comma-separated list; all of them are requested and the
/// values are read for the first one.
///
/// # Errors
///
/// Returns a `BelugaError` if the request fails, the body cannot be parsed, or
/// `vs_currencies` names no currency.
pub async fn simple_price(
    client: &BelugaClient,
    ids: &[&str],
    vs_currencies: &str,
) -> Result<HashMap<String, SimplePrice>, BelugaError> {
    api::fetch_simple_price(client, ids, vs_currencies, CacheMode::Use, None).await
}

/// Market-wide totals and dominance.
///
/// # Errors
///
/// Returns a `BelugaError` if the request fails or the body has no `data` object.
pub async fn global(client: &BelugaClient) -> Result<GlobalMarket, BelugaError> {
    api::fetch_global(client, CacheMode::Use, None).await
}

/// The trending search list, hottest first.
///
/// # Errors
///
/// Returns a `BelugaError` if the request fails or the body cannot be parsed.
pub async fn trending(client: &BelugaClient) -> Result<Vec<TrendingCoin>, BelugaError> {
    api::fetch_trending(client, CacheMode::Use, None).await
}

/// Price, market-cap and volume series for one coin over `days` (`1`, `7`, `30`, `max`, ...).
///
/// # Errors
///
/// Returns a `BelugaError` for an empty or path-like coin id, a failed request, or an
/// unparsable body.
pub async fn market_chart(
    client: &BelugaClient,
    id: &str,
    vs_currency: &str,
    days: &str,
) -> Result<MarketChart, BelugaError> {
    api::fetch_market_chart(client, id, vs_currency, days, CacheMode::Use, None).await
}

/// A builder for the markets table request.
pub struct MarketsBuilder {
    client: BelugaClient,
    query: MarketsQuery,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl MarketsBuilder {
    /// Starts from the default query (top 100 by market cap, in USD).
    pub fn new(client: &BelugaClient) -> Self {
        Self {
            client: client.clone(),
            query: MarketsQuery::default(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Replaces the whole query.
    #[must_use]
    pub fn query(mut self, query: MarketsQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the quote currency.
    #[must_use]
    pub fn vs_currency(mut self, vs: impl Into<String>) -> Self {
        self.query.vs_currency = vs.into().to_ascii_lowercase();
        self
    }

    /// Sets the page size (clamped to 1..=250).
    #[must_use]
    pub fn per_page(mut self, n: u32) -> Self {
        self.query.per_page = n;
        self
    }

    /// Sets the 1-based page.
    #[must_use]
    pub fn page(mut self, n: u32) -> Self {
        self.query.page = n;
        self
    }

    /// Requests the 7-day sparkline.
    #[must_use]
    pub fn sparkline(mut self, yes: bool) -> Self {
        self.query.sparkline = yes;
        self
    }

    /// Restricts the result to these ids.
    #[must_use]
    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns a `BelugaError` if the request fails or the body cannot be parsed.
    pub async fn fetch(mut self) -> Result<Vec<CoinMarket>, BelugaError> {
        self.query.per_page = self.query.per_page.clamp(1, 250);
        self.query.page = self.query.page.max(1);
        api::fetch_markets(
            &self.client,
            &self.query,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }
}
