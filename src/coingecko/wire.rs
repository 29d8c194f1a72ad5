use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct MarketNode {
    pub(crate) id: Option<String>,
    pub(crate) symbol: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) current_price: Option<f64>,
    pub(crate) market_cap: Option<f64>,
    pub(crate) market_cap_rank: Option<u32>,
    pub(crate) total_volume: Option<f64>,
    pub(crate) high_24h: Option<f64>,
    pub(crate) low_24h: Option<f64>,
    pub(crate) price_change_percentage_24h: Option<f64>,
    pub(crate) price_change_percentage_1h_in_currency: Option<f64>,
    pub(crate) price_change_percentage_24h_in_currency: Option<f64>,
    pub(crate) price_change_percentage_7d_in_currency: Option<f64>,
    pub(crate) circulating_supply: Option<f64>,
    pub(crate) sparkline_in_7d: Option<Sparkline>,
    pub(crate) last_updated: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct Sparkline {
    #[serde(default)]
    pub(crate) price: Vec<Option<f64>>,
}

/// `/simple/price`: coin id -> { "usd": .., "usd_market_cap": .., "usd_24h_change": .. }.
pub(crate) type SimplePriceEnvelope = HashMap<String, HashMap<String, Option<f64>>>;

#[derive(Deserialize)]
pub(crate) struct GlobalEnvelope {
    pub(crate) data: Option<GlobalNode>,
}

#[derive(Deserialize)]
pub(crate) struct GlobalNode {
    pub(crate) active_cryptocurrencies: Option<u64>,
    pub(crate) markets: Option<u64>,
    #[serde(default)]
    pub(crate) total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub(crate) total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub(crate) market_cap_percentage: HashMap<String, f64>,
    pub(crate) market_cap_change_percentage_24h_usd: Option<f64>,
    pub(crate) updated_at: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct TrendingEnvelope {
    #[serde(default)]
    pub(crate) coins: Vec<TrendingWrapper>,
}

#[derive(Deserialize)]
pub(crate) struct TrendingWrapper {
    pub(crate) item: Option<TrendingItem>,
}

#[derive(Deserialize)]
pub(crate) struct TrendingItem {
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) symbol: Option<String>,
    pub(crate) market_cap_rank: Option<u32>,
    pub(crate) thumb: Option<String>,
    pub(crate) score: Option<u32>,
    pub(crate) data: Option<TrendingData>,
}

#[derive(Deserialize)]
pub(crate) struct TrendingData {
    pub(crate) price: Option<f64>,
    #[serde(default)]
    pub(crate) price_change_percentage_24h: HashMap<String, f64>,
}

#[derive(Deserialize)]
pub(crate) struct MarketChartEnvelope {
    #[serde(default)]
    pub(crate) prices: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub(crate) market_caps: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub(crate) total_volumes: Vec<(f64, Option<f64>)>,
}
