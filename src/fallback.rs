//! Demo data substituted when an upstream fails, so widgets never render empty.
//!
//! Everything here is placeholder content with no provenance. Callers mark it with
//! [`Sourced::live`] = `false` so the frontend (and logs) can tell.

use std::fmt::Display;

use serde::Serialize;
use tracing::warn;

use crate::cms::{Article, Category};
use crate::coingecko::CoinMarket;
use crate::gnews::NewsArticle;

/// Data plus whether it came from a live upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub live: bool,
}

impl<T> Sourced<T> {
    pub const fn live(data: T) -> Self {
        Self { data, live: true }
    }

    pub const fn demo(data: T) -> Self {
        Self { data, live: false }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            live: self.live,
        }
    }
}

/// Keeps `Ok` values, swaps an error for `fallback()` after logging it under `what`.
pub fn or_fallback<T, E: Display>(
    result: Result<T, E>,
    what: &str,
    fallback: impl FnOnce() -> T,
) -> Sourced<T> {
    match result {
        Ok(data) => Sourced::live(data),
        Err(e) => {
            warn!(error = %e, "{what}: upstream failed, serving demo data");
            Sourced::demo(fallback())
        }
    }
}

/// Like [`or_fallback`], but an empty live result also counts as a failure.
pub fn or_fallback_nonempty<T, E: Display>(
    result: Result<Vec<T>, E>,
    what: &str,
    fallback: impl FnOnce() -> Vec<T>,
) -> Sourced<Vec<T>> {
    match result {
        Ok(data) if data.is_empty() => {
            warn!("{what}: upstream returned nothing, serving demo data");
            Sourced::demo(fallback())
        }
        other => or_fallback(other, what, fallback),
    }
}

// (id, symbol, name, price, market cap, 24h change %, 7d change %)
const DEMO_COINS: [(&str, &str, &str, f64, f64, f64, f64); 10] = [
    ("bitcoin", "btc", "Bitcoin", 67_250.0, 1_325_000_000_000.0, 1.85, 4.2),
    ("ethereum", "eth", "Ethereum", 3_480.0, 418_000_000_000.0, 2.4, 6.1),
    ("tether", "usdt", "Tether", 1.0, 112_000_000_000.0, 0.01, -0.02),
    ("binancecoin", "bnb", "BNB", 585.0, 86_000_000_000.0, -0.75, 1.3),
    ("solana", "sol", "Solana", 165.0, 76_000_000_000.0, 5.6, 12.4),
    ("ripple", "xrp", "XRP", 0.52, 29_000_000_000.0, -1.4, -3.8),
    ("usd-coin", "usdc", "USDC", 1.0, 33_000_000_000.0, 0.0, 0.01),
    ("cardano", "ada", "Cardano", 0.45, 16_000_000_000.0, -2.3, -6.5),
    ("dogecoin", "doge", "Dogecoin", 0.16, 23_000_000_000.0, 7.9, 15.2),
    ("tron", "trx", "TRON", 0.12, 10_500_000_000.0, 0.6, 2.2),
];

/// A fixed top-10 market snapshot.
pub fn demo_coins() -> Vec<CoinMarket> {
    DEMO_COINS
        .iter()
        .zip(1u32..)
        .map(|(&(id, symbol, name, price, cap, d24, d7), rank)| CoinMarket {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            image: None,
            current_price: Some(price),
            market_cap: Some(cap),
            market_cap_rank: Some(rank),
            total_volume: Some(cap * 0.04),
            high_24h: Some(price * (1.0 + d24.abs() / 100.0)),
            low_24h: Some(price * (1.0 - d24.abs() / 100.0)),
            price_change_percentage_1h: Some(d24 / 12.0),
            price_change_percentage_24h: Some(d24),
            price_change_percentage_7d: Some(d7),
            circulating_supply: Some(cap / price),
            sparkline_7d: None,
            last_updated: None,
        })
        .collect()
}

const DEMO_NEWS: [(&str, &str); 4] = [
    (
        "Bitcoin holds steady as traders await macro data",
        "Market participants kept positions light ahead of this week's economic releases.",
    ),
    (
        "Ethereum staking deposits reach a new high",
        "The amount of ETH locked in staking contracts continued its steady climb.",
    ),
    (
        "Stablecoin supply expands for a third straight month",
        "Growth in dollar-pegged tokens is often read as fresh liquidity entering the market.",
    ),
    (
        "Regulators publish draft guidance for digital asset exchanges",
        "The proposal covers custody, disclosures and reporting requirements.",
    ),
];

/// Placeholder headlines for the news widget.
pub fn demo_news() -> Vec<NewsArticle> {
    DEMO_NEWS
        .iter()
        .enumerate()
        .map(|(i, &(title, description))| NewsArticle {
            title: title.to_string(),
            description: Some(description.to_string()),
            content: None,
            url: format!("https://duniacrypto.example/demo/news-{}", i + 1),
            image: None,
            published_at: None,
            source_name: Some("Dunia Crypto".to_string()),
            source_url: None,
        })
        .collect()
}

/// Placeholder articles for a section of the site.
pub fn demo_articles(category: Category) -> Vec<Article> {
    let titles: &[&str] = match category {
        Category::Newsroom => &[
            "Weekly market recap",
            "What moved the top ten coins this week",
        ],
        Category::Academy => &[
            "What is a blockchain?",
            "How to read a candlestick chart",
            "Understanding market capitalization",
        ],
    };

    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Article {
            id: format!("demo-{category}-{i}"),
            title: (*title).to_string(),
            slug: format!("demo-{category}-{}", i + 1),
            excerpt: None,
            content: serde_json::Value::Array(Vec::new()),
            image: None,
            category: Some(category),
            source: Some("Dunia Crypto".to_string()),
            published_at: None,
            featured: i == 0,
        })
        .collect()
}
