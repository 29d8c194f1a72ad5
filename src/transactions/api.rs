use crate::{
    core::{
        BelugaClient, BelugaError, Upstream,
        client::{CacheMode, RetryConfig},
        wire::{path_segment, rfc3339_to_unix, scale_by_decimals},
    },
    transactions::{
        model::{Side, Transaction, TxSource},
        wire,
    },
};

pub(super) async fn fetch_moralis_transfers(
    client: &BelugaClient,
    token_address: &str,
    chain: &str,
    limit: u32,
    price_usd: Option<f64>,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Transaction>, BelugaError> {
    let address = path_segment("token address", token_address)?;
    let mut url = client
        .base_url(Upstream::Moralis)?
        .join(&format!("erc20/{address}/transfers"))?;
    url.query_pairs_mut()
        .append_pair("chain", chain)
        .append_pair("limit", &limit.clamp(1, 100).to_string())
        .append_pair("order", "DESC");

    let env: wire::MoralisEnvelope = client
        .fetch_json(Upstream::Moralis, url, CacheMode::Bypass, retry_override)
        .await?;

    Ok(env
        .result
        .into_iter()
        .filter_map(|t| {
            let token_amount = match (t.value_decimal.as_deref(), t.value.as_deref()) {
                (Some(dec), _) => dec.trim().parse::<f64>().ok(),
                (None, Some(raw)) => {
                    let decimals = t
                        .token_decimals
                        .as_deref()
                        .and_then(|d| d.parse::<u32>().ok())
                        .unwrap_or(18);
                    scale_by_decimals(raw, decimals)
                }
                (None, None) => None,
            }?;
            Some(Transaction {
                hash: t.transaction_hash?,
                wallet: t.to_address,
                side: Side::Transfer,
                token_amount,
                usd_amount: price_usd.map(|p| p * token_amount),
                price_usd,
                timestamp: rfc3339_to_unix(t.block_timestamp.as_deref())?,
                source: TxSource::Moralis,
            })
        })
        .collect())
}

pub(super) async fn fetch_kaiko_trades(
    client: &BelugaClient,
    exchange: &str,
    pair: &str,
    limit: u32,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Transaction>, BelugaError> {
    let exchange = path_segment("exchange", exchange)?;
    let pair = path_segment("pair", pair)?;
    let mut url = client.base_url(Upstream::Kaiko)?.join(&format!(
        "v2/data/trades.v1/exchanges/{exchange}/spot/{pair}/trades"
    ))?;
    url.query_pairs_mut()
        .append_pair("page_size", &limit.clamp(1, 1000).to_string())
        .append_pair("sort", "desc");

    let env: wire::KaikoEnvelope = client
        .fetch_json(Upstream::Kaiko, url, CacheMode::Bypass, retry_override)
        .await?;

    Ok(env
        .data
        .into_iter()
        .filter_map(|t| {
            let price = t.price?;
            let amount = t.amount?;
            Some(Transaction {
                hash: t.trade_id?,
                wallet: None,
                side: if t.taker_side_sell.unwrap_or(false) {
                    Side::Sell
                } else {
                    Side::Buy
                },
                token_amount: amount,
                usd_amount: Some(price * amount),
                price_usd: Some(price),
                timestamp: t.timestamp? / 1000,
                source: TxSource::Kaiko,
            })
        })
        .collect())
}
