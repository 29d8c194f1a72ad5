//! The transaction feed: Moralis transfers, then Kaiko trades, then demo records.

mod api;
mod demo;
mod model;
mod wire;

pub use demo::demo_transactions;
pub use model::{Side, Transaction, TxSource};

use chrono::Utc;
use tracing::{debug, warn};

use crate::core::{BelugaClient, BelugaError};
use crate::fallback::Sourced;

/// Recent ERC-20 transfers of `token_address` on `chain` (`eth`, `bsc`, `polygon`, ...).
///
/// USD amounts are filled in only when `price_usd` is known.
///
/// # Errors
///
/// `BelugaError::MissingApiKey` without a Moralis key, plus HTTP/parse errors.
pub async fn moralis_transfers(
    client: &BelugaClient,
    token_address: &str,
    chain: &str,
    limit: u32,
    price_usd: Option<f64>,
) -> Result<Vec<Transaction>, BelugaError> {
    api::fetch_moralis_transfers(client, token_address, chain, limit, price_usd, None).await
}

/// Recent spot trades of `pair` (e.g. `eth-usd`) on `exchange` (e.g. `cbse`).
///
/// # Errors
///
/// `BelugaError::MissingApiKey` without a Kaiko key, plus HTTP/parse errors.
pub async fn kaiko_trades(
    client: &BelugaClient,
    exchange: &str,
    pair: &str,
    limit: u32,
) -> Result<Vec<Transaction>, BelugaError> {
    api::fetch_kaiko_trades(client, exchange, pair, limit, None).await
}

/// Sources tried, in order, by [`TransactionFeed::fetch`].
#[derive(Debug, Clone)]
pub struct TransactionFeed {
    client: BelugaClient,
    moralis: Option<(String, String)>,
    kaiko: Option<(String, String)>,
    limit: u32,
    reference_price: Option<f64>,
}

impl TransactionFeed {
    pub fn new(client: &BelugaClient) -> Self {
        Self {
            client: client.clone(),
            moralis: None,
            kaiko: None,
            limit: 25,
            reference_price: None,
        }
    }

    /// Try Moralis transfers of this token first.
    #[must_use]
    pub fn moralis(mut self, token_address: impl Into<String>, chain: impl Into<String>) -> Self {
        self.moralis = Some((token_address.into(), chain.into()));
        self
    }

    /// Then Kaiko trades of this pair.
    #[must_use]
    pub fn kaiko(mut self, exchange: impl Into<String>, pair: impl Into<String>) -> Self {
        self.kaiko = Some((exchange.into(), pair.into()));
        self
    }

    /// Number of rows wanted, clamped to 1..=100.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Token price used for USD amounts and as the demo base price.
    #[must_use]
    pub const fn reference_price(mut self, price_usd: f64) -> Self {
        self.reference_price = Some(price_usd);
        self
    }

    /// Always yields rows, newest first. `live` is false when demo rows were substituted.
    pub async fn fetch(&self) -> Sourced<Vec<Transaction>> {
        let limit = self.limit.clamp(1, 100);

        if let Some((token, chain)) = &self.moralis {
            match moralis_transfers(&self.client, token, chain, limit, self.reference_price).await {
                Ok(rows) if !rows.is_empty() => return Sourced::live(newest_first(rows)),
                Ok(_) => debug!(%token, "moralis returned no transfers"),
                Err(e) => warn!(error = %e, %token, "moralis transfers failed"),
            }
        }

        if let Some((exchange, pair)) = &self.kaiko {
            match kaiko_trades(&self.client, exchange, pair, limit).await {
                Ok(rows) if !rows.is_empty() => return Sourced::live(newest_first(rows)),
                Ok(_) => debug!(%exchange, %pair, "kaiko returned no trades"),
                Err(e) => warn!(error = %e, %exchange, %pair, "kaiko trades failed"),
            }
        }

        warn!("transaction feed: no live source answered, serving demo data");
        let base = self.reference_price.unwrap_or(1.0);
        let rows = {
            let mut rng = rand::rng();
            demo_transactions(limit as usize, base, Utc::now().timestamp(), &mut rng)
        };
        Sourced::demo(rows)
    }
}

fn newest_first(mut rows: Vec<Transaction>) -> Vec<Transaction> {
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rows
}
