use serde::{Deserialize, Serialize};

/// One side of a trading pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

/// A DEX liquidity pool with its 24h activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexPair {
    pub chain_id: String,
    pub dex_id: String,
    pub pair_address: String,
    pub url: Option<String>,
    pub base_token: DexToken,
    pub quote_token: DexToken,
    /// Price of the base token in the quote token.
    pub price_native: Option<f64>,
    pub price_usd: Option<f64>,
    pub volume_h24: Option<f64>,
    pub price_change_h24: Option<f64>,
    pub buys_h24: u64,
    pub sells_h24: u64,
    pub liquidity_usd: Option<f64>,
    pub fdv: Option<f64>,
    /// Unix milliseconds.
    pub pair_created_at: Option<i64>,
}
