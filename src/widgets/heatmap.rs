use serde::{Deserialize, Serialize};

use crate::coingecko::CoinMarket;

/// Color bucket of a heatmap tile, from the 24h change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heat {
    StrongDown,
    Down,
    Flat,
    Up,
    StrongUp,
}

impl Heat {
    /// `<= -5` strong down, `< -1` down, `<= 1` flat, `< 5` up, `>= 5` strong up.
    pub fn from_change(pct: f64) -> Self {
        if pct <= -5.0 {
            Self::StrongDown
        } else if pct < -1.0 {
            Self::Down
        } else if pct <= 1.0 {
            Self::Flat
        } else if pct < 5.0 {
            Self::Up
        } else {
            Self::StrongUp
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatTile {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub market_cap: f64,
    /// Share of the shown total market cap; weights of one heatmap sum to 1.
    pub weight: f64,
    pub heat: Heat,
}

/// The `limit` largest coins by market cap as weighted tiles, largest first.
///
/// Coins without a positive market cap are left out.
pub fn tiles(coins: &[CoinMarket], limit: usize) -> Vec<HeatTile> {
    let mut ranked: Vec<(&CoinMarket, f64)> = coins
        .iter()
        .filter_map(|c| c.market_cap.filter(|m| m.is_finite() && *m > 0.0).map(|m| (c, m)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);

    let total: f64 = ranked.iter().map(|(_, m)| m).sum();

    ranked
        .into_iter()
        .map(|(c, cap)| HeatTile {
            id: c.id.clone(),
            symbol: c.symbol.to_uppercase(),
            name: c.name.clone(),
            price: c.current_price,
            change_24h: c.price_change_percentage_24h,
            market_cap: cap,
            weight: cap / total,
            heat: Heat::from_change(c.price_change_percentage_24h.unwrap_or(0.0)),
        })
        .collect()
}
