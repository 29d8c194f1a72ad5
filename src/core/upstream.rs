use std::fmt;

use serde::Serialize;

/// A third-party service the site pulls data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Upstream {
    /// Coin prices, market caps and charts.
    CoinGecko,
    /// On-chain DEX pair data.
    DexScreener,
    /// News search and headlines.
    GNews,
    /// The headless CMS holding articles.
    Sanity,
    /// ERC-20 transfer history.
    Moralis,
    /// Exchange trade prints.
    Kaiko,
}

/// Where an API key goes on the outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPlacement {
    /// Sent as the named header.
    Header(&'static str),
    /// Appended as the named query parameter.
    Query(&'static str),
    /// Sent as `Authorization: Bearer <key>`.
    Bearer,
    /// The upstream takes no key.
    None,
}

impl Upstream {
    /// Lowercase name used in proxy paths and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoinGecko => "coingecko",
            Self::DexScreener => "dexscreener",
            Self::GNews => "gnews",
            Self::Sanity => "sanity",
            Self::Moralis => "moralis",
            Self::Kaiko => "kaiko",
        }
    }

    /// How the key is attached. CoinGecko's pro plan uses a different header.
    pub const fn key_placement(self, coingecko_pro: bool) -> KeyPlacement {
        match self {
            Self::CoinGecko if coingecko_pro => KeyPlacement::Header("x-cg-pro-api-key"),
            Self::CoinGecko => KeyPlacement::Header("x-cg-demo-api-key"),
            Self::GNews => KeyPlacement::Query("apikey"),
            Self::Moralis => KeyPlacement::Header("X-API-Key"),
            Self::Kaiko => KeyPlacement::Header("X-Api-Key"),
            Self::Sanity => KeyPlacement::Bearer,
            Self::DexScreener => KeyPlacement::None,
        }
    }

    /// Whether a request without a configured key is pointless.
    pub const fn requires_key(self) -> bool {
        matches!(self, Self::GNews | Self::Moralis | Self::Kaiko)
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CoinGecko => "CoinGecko",
            Self::DexScreener => "DexScreener",
            Self::GNews => "GNews",
            Self::Sanity => "Sanity",
            Self::Moralis => "Moralis",
            Self::Kaiko => "Kaiko",
        })
    }
}

/// Query parameters that carry credentials and must never be forwarded from a caller.
pub const KEY_QUERY_PARAMS: [&str; 3] = ["apikey", "x_cg_demo_api_key", "x_cg_pro_api_key"];
