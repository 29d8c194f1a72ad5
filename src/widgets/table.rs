use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coingecko::CoinMarket;
use crate::transactions::{Side, Transaction};

/// Column the markets table is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Rank,
    Name,
    Price,
    Change24h,
    MarketCap,
    Volume,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "rank" | "market_cap_rank" => Self::Rank,
            "name" => Self::Name,
            "price" | "current_price" => Self::Price,
            "change_24h" | "change" | "price_change_percentage_24h" => Self::Change24h,
            "market_cap" => Self::MarketCap,
            "volume" | "total_volume" => Self::Volume,
            other => return Err(format!("unknown sort key: {other}")),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Coins whose name or symbol contains `query`, ignoring case. Blank queries keep all.
pub fn filter_coins(coins: &[CoinMarket], query: &str) -> Vec<CoinMarket> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return coins.to_vec();
    }
    coins
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.symbol.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// Missing values go last regardless of direction.
fn cmp_missing_last<T>(a: Option<T>, b: Option<T>, order: SortOrder, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::Asc => cmp(&x, &y),
            SortOrder::Desc => cmp(&y, &x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts in place. Ties fall back to market-cap rank.
pub fn sort_coins(coins: &mut [CoinMarket], key: SortKey, order: SortOrder) {
    let by_rank =
        |a: &CoinMarket, b: &CoinMarket| cmp_missing_last(a.market_cap_rank, b.market_cap_rank, SortOrder::Asc, Ord::cmp);

    coins.sort_by(|a, b| {
        let primary = match key {
            SortKey::Rank => cmp_missing_last(a.market_cap_rank, b.market_cap_rank, order, Ord::cmp),
            SortKey::Name => match order {
                SortOrder::Asc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortOrder::Desc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            },
            SortKey::Price => cmp_missing_last(a.current_price, b.current_price, order, f64::total_cmp),
            SortKey::Change24h => cmp_missing_last(
                a.price_change_percentage_24h,
                b.price_change_percentage_24h,
                order,
                f64::total_cmp,
            ),
            SortKey::MarketCap => cmp_missing_last(a.market_cap, b.market_cap, order, f64::total_cmp),
            SortKey::Volume => cmp_missing_last(a.total_volume, b.total_volume, order, f64::total_cmp),
        };
        primary.then_with(|| by_rank(a, b))
    });
}

/// Transaction table filters. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TxFilter {
    pub side: Option<Side>,
    /// Rows with an unknown USD amount are dropped when this is set.
    pub min_usd: Option<f64>,
}

/// Applies `filter` and returns the rows newest first.
pub fn filter_transactions(rows: &[Transaction], filter: &TxFilter) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = rows
        .iter()
        .filter(|t| filter.side.is_none_or(|s| t.side == s))
        .filter(|t| match filter.min_usd {
            Some(min) => t.usd_amount.is_some_and(|usd| usd >= min),
            None => true,
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    out
}
