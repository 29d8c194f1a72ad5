use serde::Deserialize;

use crate::core::wire::de_opt_f64_lenient;

#[derive(Deserialize)]
pub(crate) struct MoralisEnvelope {
    #[serde(default)]
    pub(crate) result: Vec<MoralisTransfer>,
}

#[derive(Deserialize)]
pub(crate) struct MoralisTransfer {
    pub(crate) transaction_hash: Option<String>,
    pub(crate) to_address: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) value_decimal: Option<String>,
    pub(crate) token_decimals: Option<String>,
    pub(crate) block_timestamp: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct KaikoEnvelope {
    #[serde(default)]
    pub(crate) data: Vec<KaikoTrade>,
}

#[derive(Deserialize)]
pub(crate) struct KaikoTrade {
    /// Unix milliseconds.
    pub(crate) timestamp: Option<i64>,
    pub(crate) trade_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) amount: Option<f64>,
    pub(crate) taker_side_sell: Option<bool>,
}
