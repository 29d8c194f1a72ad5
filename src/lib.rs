//! beluga: the data backend of the Dunia Crypto site.
//!
//! Typed clients for the upstreams the site's widgets read from (CoinGecko,
//! DexScreener, GNews, Moralis, Kaiko) and for the Sanity dataset holding its
//! articles, plus the same-origin proxy server that injects API keys and masks
//! upstream failures with demo data.

pub mod cms;
pub mod coingecko;
pub mod config;
pub mod core;
pub mod dexscreener;
pub mod fallback;
pub mod gnews;
pub mod poll;
#[cfg(feature = "server")]
pub mod proxy;
pub mod transactions;
pub mod widgets;

pub use crate::core::{
    BelugaClient, BelugaClientBuilder, BelugaError, CacheMode, RawResponse, RetryConfig,
    Upstream,
};
pub use crate::core::client::Backoff;
pub use cms::{Article, ArticleQuery, Category};
pub use coingecko::{CoinMarket, MarketsBuilder, MarketsQuery};
pub use config::ServerConfig;
pub use dexscreener::DexPair;
pub use fallback::Sourced;
pub use gnews::{NewsArticle, NewsQuery};
pub use transactions::{Side, Transaction, TransactionFeed, TxSource};
