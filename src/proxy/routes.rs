//! Widget endpoints: shaped payloads with demo fallbacks.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use futures::future;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    cms::{self, ArticleQuery, Category},
    coingecko::{self, CoinMarket, GlobalMarket, MarketsBuilder},
    fallback::{Sourced, demo_articles, demo_coins, demo_news, or_fallback, or_fallback_nonempty},
    gnews::{self, NewsQuery},
    transactions::{Side, TransactionFeed},
    widgets::{
        TickerItem, heatmap,
        table::{self, SortKey, SortOrder, TxFilter},
        ticker::{items_from_coins, items_from_prices},
    },
};

use super::{error::ProxyError, state::AppState};

/// Set to `true` on responses that carry demo data.
pub const FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-beluga-fallback");

fn sourced_json<T: Serialize>(sourced: Sourced<T>) -> Response {
    let mut resp = Json(sourced.data).into_response();
    if !sourced.live {
        resp.headers_mut()
            .insert(FALLBACK_HEADER, HeaderValue::from_static("true"));
    }
    resp
}

fn parse_opt<T: std::str::FromStr<Err = String>>(raw: Option<&str>) -> Result<Option<T>, ProxyError> {
    raw.filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
        .map_err(ProxyError::BadRequest)
}

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketsParams {
    pub vs_currency: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sparkline: Option<bool>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

async fn load_markets(state: &AppState, params: &MarketsParams) -> Sourced<Vec<CoinMarket>> {
    let mut builder = MarketsBuilder::new(&state.client)
        .per_page(params.per_page.unwrap_or(100))
        .page(params.page.unwrap_or(1))
        .sparkline(params.sparkline.unwrap_or(false));
    if let Some(vs) = params.vs_currency.as_deref() {
        builder = builder.vs_currency(vs);
    }
    or_fallback_nonempty(builder.fetch().await, "markets", demo_coins)
}

pub async fn markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarketsParams>,
) -> Result<Response, ProxyError> {
    let key: SortKey = parse_opt(params.sort.as_deref())?.unwrap_or_default();
    let order: SortOrder = parse_opt(params.order.as_deref())?.unwrap_or_default();

    let sourced = load_markets(&state, &params).await.map(|coins| {
        let mut rows = table::filter_coins(&coins, params.q.as_deref().unwrap_or(""));
        table::sort_coins(&mut rows, key, order);
        rows
    });
    Ok(sourced_json(sourced))
}

#[derive(Debug, Default, Deserialize)]
pub struct HeatmapParams {
    pub limit: Option<usize>,
    pub vs_currency: Option<String>,
}

pub async fn heatmap(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HeatmapParams>,
) -> Response {
    let market_params = MarketsParams {
        vs_currency: params.vs_currency,
        ..MarketsParams::default()
    };
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let sourced = load_markets(&state, &market_params)
        .await
        .map(|coins| heatmap::tiles(&coins, limit));
    sourced_json(sourced)
}

const TICKER_IDS: &str = "bitcoin,ethereum,solana,binancecoin,ripple";

#[derive(Debug, Default, Deserialize)]
pub struct TickerParams {
    /// Comma-separated CoinGecko ids.
    pub ids: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TickerPayload {
    pub items: Vec<TickerItem>,
    /// Absent when the global endpoint failed; the ticker still renders.
    pub global: Option<GlobalMarket>,
}

pub async fn ticker(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TickerParams>,
) -> Response {
    let raw_ids = params.ids.unwrap_or_else(|| TICKER_IDS.to_string());
    let ids: Vec<&str> = raw_ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .take(50)
        .collect();

    let (prices, global) = future::join(
        coingecko::simple_price(&state.client, &ids, "usd"),
        coingecko::global(&state.client),
    )
    .await;

    let items = or_fallback_nonempty(
        prices.map(|p| items_from_prices(&ids, &p)),
        "ticker",
        || {
            let demo = demo_coins();
            let wanted: Vec<CoinMarket> = demo
                .iter()
                .filter(|c| ids.contains(&c.id.as_str()))
                .cloned()
                .collect();
            items_from_coins(if wanted.is_empty() { &demo } else { &wanted })
        },
    );

    let global = global
        .inspect_err(|e| warn!(error = %e, "ticker: global market data unavailable"))
        .ok();

    sourced_json(items.map(|items| TickerPayload { items, global }))
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub q: Option<String>,
    pub lang: Option<String>,
    pub max: Option<u32>,
}

pub async fn news(State(state): State<Arc<AppState>>, Query(params): Query<NewsParams>) -> Response {
    let mut query = NewsQuery::search(params.q.unwrap_or_else(|| "crypto".into()));
    if let Some(lang) = params.lang {
        query = query.lang(lang);
    }
    if let Some(max) = params.max {
        query = query.max(max);
    }

    let result = gnews::search(&state.client, &query).await;
    sourced_json(or_fallback_nonempty(result, "news", demo_news))
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionsParams {
    pub token: Option<String>,
    pub chain: Option<String>,
    pub exchange: Option<String>,
    pub pair: Option<String>,
    pub limit: Option<u32>,
    pub price: Option<f64>,
    pub side: Option<String>,
    pub min_usd: Option<f64>,
}

fn parse_side(raw: Option<&str>) -> Result<Option<Side>, ProxyError> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("" | "all") => Ok(None),
        Some("buy") => Ok(Some(Side::Buy)),
        Some("sell") => Ok(Some(Side::Sell)),
        Some("transfer") => Ok(Some(Side::Transfer)),
        Some(other) => Err(ProxyError::BadRequest(format!("unknown side: {other}"))),
    }
}

pub async fn transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionsParams>,
) -> Result<Response, ProxyError> {
    let filter = TxFilter {
        side: parse_side(params.side.as_deref())?,
        min_usd: params.min_usd,
    };

    let mut feed = TransactionFeed::new(&state.client).limit(params.limit.unwrap_or(25));
    let token = params.token.or_else(|| state.config.demo_token.clone());
    if let Some(token) = token {
        let chain = params
            .chain
            .unwrap_or_else(|| state.config.demo_chain.clone());
        feed = feed.moralis(token, chain);
    }
    if let (Some(exchange), Some(pair)) = (params.exchange, params.pair) {
        feed = feed.kaiko(exchange, pair);
    }
    if let Some(price) = params.price.filter(|p| p.is_finite() && *p > 0.0) {
        feed = feed.reference_price(price);
    }

    let sourced = feed
        .fetch()
        .await
        .map(|rows| table::filter_transactions(&rows, &filter));
    Ok(sourced_json(sourced))
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticlesParams {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub async fn articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticlesParams>,
) -> Result<Response, ProxyError> {
    let category: Option<Category> = parse_opt(params.category.as_deref())?;

    let mut query = ArticleQuery::new()
        .featured_only(params.featured.unwrap_or(false))
        .limit(params.limit.unwrap_or(20))
        .offset(params.offset.unwrap_or(0));
    if let Some(c) = category {
        query = query.category(c);
    }

    let result = cms::articles(&state.client, &query).await;
    let sourced = or_fallback(result, "articles", || {
        demo_articles(category.unwrap_or(Category::Newsroom))
    });
    Ok(sourced_json(sourced))
}

pub async fn article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, ProxyError> {
    match cms::article_by_slug(&state.client, &slug).await? {
        Some(article) => Ok(Json(article).into_response()),
        None => Err(ProxyError::NotFound(format!("article {slug:?}"))),
    }
}
