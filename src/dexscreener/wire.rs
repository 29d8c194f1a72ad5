use std::collections::HashMap;

use serde::Deserialize;

use crate::core::wire::de_opt_f64_lenient;

#[derive(Deserialize)]
pub(crate) struct PairsEnvelope {
    pub(crate) pairs: Option<Vec<PairNode>>,
    /// `/latest/dex/pairs` used to answer with a single `pair`.
    pub(crate) pair: Option<PairNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PairNode {
    pub(crate) chain_id: Option<String>,
    pub(crate) dex_id: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) pair_address: Option<String>,
    pub(crate) base_token: Option<TokenNode>,
    pub(crate) quote_token: Option<TokenNode>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) price_native: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) price_usd: Option<f64>,
    #[serde(default)]
    pub(crate) txns: HashMap<String, TxnCounts>,
    #[serde(default)]
    pub(crate) volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub(crate) price_change: HashMap<String, Option<f64>>,
    pub(crate) liquidity: Option<LiquidityNode>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) fdv: Option<f64>,
    pub(crate) pair_created_at: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct TokenNode {
    pub(crate) address: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) symbol: Option<String>,
}

#[derive(Deserialize, Clone, Copy)]
pub(crate) struct TxnCounts {
    #[serde(default)]
    pub(crate) buys: u64,
    #[serde(default)]
    pub(crate) sells: u64,
}

#[derive(Deserialize)]
pub(crate) struct LiquidityNode {
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) usd: Option<f64>,
}
