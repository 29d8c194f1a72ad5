use serde::{Deserialize, Serialize};

/// One row of the markets table: a coin's latest snapshot.
///
/// Field names follow CoinGecko's so live and fallback payloads look the same to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_percentage_1h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub circulating_supply: Option<f64>,
    /// Hourly prices over the last seven days, when requested.
    pub sparkline_7d: Option<Vec<f64>>,
    /// Unix seconds of CoinGecko's last update.
    pub last_updated: Option<i64>,
}

/// Price, market cap and 24h change for one coin in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplePrice {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub change_24h: Option<f64>,
}

/// Market-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMarket {
    pub active_cryptocurrencies: Option<u64>,
    pub markets: Option<u64>,
    pub total_market_cap_usd: Option<f64>,
    pub total_volume_usd: Option<f64>,
    pub btc_dominance: Option<f64>,
    pub eth_dominance: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub updated_at: Option<i64>,
}

/// A coin from the trending search list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
    /// Position in the trending list, 0 is the hottest.
    pub score: Option<u32>,
    pub price_usd: Option<f64>,
    pub change_24h: Option<f64>,
}

/// A single `(time, value)` sample of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Unix milliseconds.
    pub timestamp_ms: i64,
    pub value: f64,
}

/// Price, market-cap and volume series for one coin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<ChartPoint>,
    pub market_caps: Vec<ChartPoint>,
    pub total_volumes: Vec<ChartPoint>,
}
