//! DexScreener pair lookups (no API key).

mod api;
mod model;
mod wire;

pub use model::{DexPair, DexToken};

use crate::core::{BelugaClient, BelugaError, client::CacheMode, wire::path_segment};

/// Free-text search across pairs (`/latest/dex/search?q=`).
///
/// # Errors
///
/// Returns a `BelugaError` if the request fails or the body cannot be parsed.
#[cfg_attr(feature = "instrument", tracing::instrument(skip(client), err))]
pub async fn search_pairs(client: &BelugaClient, query: &str) -> Result<Vec<DexPair>, BelugaError> {
    api::fetch_pairs(
        client,
        "latest/dex/search",
        Some(("q", query)),
        CacheMode::Use,
        None,
    )
    .await
}

/// All pairs that trade `token_address`, across chains.
///
/// # Errors
///
/// Returns a `BelugaError` for an invalid address, a failed request, or an unparsable body.
pub async fn token_pairs(
    client: &BelugaClient,
    token_address: &str,
) -> Result<Vec<DexPair>, BelugaError> {
    let address = path_segment("token address", token_address)?;
    api::fetch_pairs(
        client,
        &format!("latest/dex/tokens/{address}"),
        None,
        CacheMode::Use,
        None,
    )
    .await
}

/// One pair by chain and pool address. Empty when DexScreener does not know it.
///
/// # Errors
///
/// Returns a `BelugaError` for invalid segments, a failed request, or an unparsable body.
pub async fn pair(
    client: &BelugaClient,
    chain_id: &str,
    pair_address: &str,
) -> Result<Vec<DexPair>, BelugaError> {
    let chain = path_segment("chain id", chain_id)?;
    let address = path_segment("pair address", pair_address)?;
    api::fetch_pairs(
        client,
        &format!("latest/dex/pairs/{chain}/{address}"),
        None,
        CacheMode::Use,
        None,
    )
    .await
}
