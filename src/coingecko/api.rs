use std::collections::HashMap;

use crate::{
    coingecko::{
        model::{ChartPoint, CoinMarket, GlobalMarket, MarketChart, SimplePrice, TrendingCoin},
        wire,
    },
    core::{
        BelugaClient, BelugaError, Upstream,
        client::{CacheMode, RetryConfig},
        wire::{path_segment, rfc3339_to_unix},
    },
};

use super::MarketsQuery;

pub(super) async fn fetch_markets(
    client: &BelugaClient,
    query: &MarketsQuery,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<CoinMarket>, BelugaError> {
    let mut url = client.base_url(Upstream::CoinGecko)?.join("coins/markets")?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("vs_currency", &query.vs_currency)
            .append_pair("order", &query.order)
            .append_pair("per_page", &query.per_page.to_string())
            .append_pair("page", &query.page.to_string())
            .append_pair("sparkline", if query.sparkline { "true" } else { "false" });
        if !query.price_change_percentage.is_empty() {
            qp.append_pair("price_change_percentage", &query.price_change_percentage);
        }
        if !query.ids.is_empty() {
            qp.append_pair("ids", &query.ids.join(","));
        }
    }

    let nodes: Vec<wire::MarketNode> = client
        .fetch_json(Upstream::CoinGecko, url, cache_mode, retry_override)
        .await?;

    Ok(nodes.into_iter().filter_map(market_from_node).collect())
}

fn market_from_node(n: wire::MarketNode) -> Option<CoinMarket> {
    Some(CoinMarket {
        id: n.id?,
        symbol: n.symbol.unwrap_or_default(),
        name: n.name.unwrap_or_default(),
        image: n.image,
        current_price: n.current_price,
        market_cap: n.market_cap,
        market_cap_rank: n.market_cap_rank,
        total_volume: n.total_volume,
        high_24h: n.high_24h,
        low_24h: n.low_24h,
        price_change_percentage_1h: n.price_change_percentage_1h_in_currency,
        price_change_percentage_24h: n
            .price_change_percentage_24h_in_currency
            .or(n.price_change_percentage_24h),
        price_change_percentage_7d: n.price_change_percentage_7d_in_currency,
        circulating_supply: n.circulating_supply,
        sparkline_7d: n
            .sparkline_in_7d
            .map(|s| s.price.into_iter().flatten().collect()),
        last_updated: rfc3339_to_unix(n.last_updated.as_deref()),
    })
}

pub(super) async fn fetch_simple_price(
    client: &BelugaClient,
    ids: &[&str],
    vs_currencies: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<HashMap<String, SimplePrice>, BelugaError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let currencies: Vec<String> = vs_currencies
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| !c.is_empty())
        .collect();
    let Some(vs) = currencies.first().cloned() else {
        return Err(BelugaError::Data(format!("no quote currency in {vs_currencies:?}")));
    };

    let mut url = client.base_url(Upstream::CoinGecko)?.join("simple/price")?;
    url.query_pairs_mut()
        .append_pair("ids", &ids.join(","))
        .append_pair("vs_currencies", &currencies.join(","))
        .append_pair("include_market_cap", "true")
        .append_pair("include_24hr_change", "true");

    let env: wire::SimplePriceEnvelope = client
        .fetch_json(Upstream::CoinGecko, url, cache_mode, retry_override)
        .await?;

    let market_cap_key = format!("{vs}_market_cap");
    let change_key = format!("{vs}_24h_change");

    Ok(env
        .into_iter()
        .map(|(id, fields)| {
            let pick = |k: &str| fields.get(k).copied().flatten();
            let price = SimplePrice {
                price: pick(&vs),
                market_cap: pick(&market_cap_key),
                change_24h: pick(&change_key),
            };
            (id, price)
        })
        .collect())
}

pub(super) async fn fetch_global(
    client: &BelugaClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<GlobalMarket, BelugaError> {
    let url = client.base_url(Upstream::CoinGecko)?.join("global")?;
    let env: wire::GlobalEnvelope = client
        .fetch_json(Upstream::CoinGecko, url, cache_mode, retry_override)
        .await?;

    let g = env
        .data
        .ok_or_else(|| BelugaError::Data("global: missing data".into()))?;

    Ok(GlobalMarket {
        active_cryptocurrencies: g.active_cryptocurrencies,
        markets: g.markets,
        total_market_cap_usd: g.total_market_cap.get("usd").copied(),
        total_volume_usd: g.total_volume.get("usd").copied(),
        btc_dominance: g.market_cap_percentage.get("btc").copied(),
        eth_dominance: g.market_cap_percentage.get("eth").copied(),
        market_cap_change_24h: g.market_cap_change_percentage_24h_usd,
        updated_at: g.updated_at,
    })
}

pub(super) async fn fetch_trending(
    client: &BelugaClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<TrendingCoin>, BelugaError> {
    let url = client.base_url(Upstream::CoinGecko)?.join("search/trending")?;
    let env: wire::TrendingEnvelope = client
        .fetch_json(Upstream::CoinGecko, url, cache_mode, retry_override)
        .await?;

    Ok(env
        .coins
        .into_iter()
        .filter_map(|w| {
            let item = w.item?;
            let data = item.data;
            Some(TrendingCoin {
                id: item.id?,
                name: item.name.unwrap_or_default(),
                symbol: item.symbol.unwrap_or_default(),
                market_cap_rank: item.market_cap_rank,
                thumb: item.thumb,
                score: item.score,
                price_usd: data.as_ref().and_then(|d| d.price),
                change_24h: data.and_then(|d| d.price_change_percentage_24h.get("usd").copied()),
            })
        })
        .collect())
}

pub(super) async fn fetch_market_chart(
    client: &BelugaClient,
    id: &str,
    vs_currency: &str,
    days: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<MarketChart, BelugaError> {
    let id = path_segment("coin id", id)?;
    let mut url = client
        .base_url(Upstream::CoinGecko)?
        .join(&format!("coins/{id}/market_chart"))?;
    url.query_pairs_mut()
        .append_pair("vs_currency", vs_currency)
        .append_pair("days", days);

    let env: wire::MarketChartEnvelope = client
        .fetch_json(Upstream::CoinGecko, url, cache_mode, retry_override)
        .await?;

    Ok(MarketChart {
        prices: to_points(env.prices),
        market_caps: to_points(env.market_caps),
        total_volumes: to_points(env.total_volumes),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn to_points(raw: Vec<(f64, Option<f64>)>) -> Vec<ChartPoint> {
    raw.into_iter()
        .filter_map(|(ts, v)| {
            Some(ChartPoint {
                timestamp_ms: ts as i64,
                value: v?,
            })
        })
        .collect()
}
