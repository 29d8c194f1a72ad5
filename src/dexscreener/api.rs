use crate::{
    core::{
        BelugaClient, BelugaError, Upstream,
        client::{CacheMode, RetryConfig},
    },
    dexscreener::{
        model::{DexPair, DexToken},
        wire,
    },
};

pub(super) async fn fetch_pairs(
    client: &BelugaClient,
    path: &str,
    query: Option<(&str, &str)>,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<DexPair>, BelugaError> {
    let mut url = client.base_url(Upstream::DexScreener)?.join(path)?;
    if let Some((k, v)) = query {
        url.query_pairs_mut().append_pair(k, v);
    }

    let env: wire::PairsEnvelope = client
        .fetch_json(Upstream::DexScreener, url, cache_mode, retry_override)
        .await?;

    let nodes = env
        .pairs
        .unwrap_or_default()
        .into_iter()
        .chain(env.pair);

    Ok(nodes.filter_map(pair_from_node).collect())
}

fn token_from_node(t: Option<wire::TokenNode>) -> DexToken {
    let t = t.unwrap_or(wire::TokenNode {
        address: None,
        name: None,
        symbol: None,
    });
    DexToken {
        address: t.address.unwrap_or_default(),
        name: t.name.unwrap_or_default(),
        symbol: t.symbol.unwrap_or_default(),
    }
}

fn pair_from_node(n: wire::PairNode) -> Option<DexPair> {
    let h24 = n.txns.get("h24").copied();
    Some(DexPair {
        chain_id: n.chain_id.unwrap_or_default(),
        dex_id: n.dex_id.unwrap_or_default(),
        pair_address: n.pair_address?,
        url: n.url,
        base_token: token_from_node(n.base_token),
        quote_token: token_from_node(n.quote_token),
        price_native: n.price_native,
        price_usd: n.price_usd,
        volume_h24: n.volume.get("h24").copied().flatten(),
        price_change_h24: n.price_change.get("h24").copied().flatten(),
        buys_h24: h24.map_or(0, |t| t.buys),
        sells_h24: h24.map_or(0, |t| t.sells),
        liquidity_usd: n.liquidity.and_then(|l| l.usd),
        fdv: n.fdv,
        pair_created_at: n.pair_created_at,
    })
}
