use serde::{Deserialize, Serialize};

/// Direction of a trade from the taker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
    /// A plain token transfer with no trade direction.
    Transfer,
}

/// Where a transaction record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxSource {
    Moralis,
    Kaiko,
    /// Synthetic; see [`super::demo_transactions`].
    Demo,
}

/// One row of the transaction feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash, or the exchange trade id for Kaiko prints.
    pub hash: String,
    /// Receiving wallet; exchange trades have none.
    pub wallet: Option<String>,
    pub side: Side,
    pub token_amount: f64,
    pub usd_amount: Option<f64>,
    pub price_usd: Option<f64>,
    /// Unix seconds.
    pub timestamp: i64,
    pub source: TxSource,
}
