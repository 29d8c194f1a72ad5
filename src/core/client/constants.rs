//! Centralized constants for default endpoints and UA.

pub(crate) const USER_AGENT: &str = concat!("beluga/", env!("CARGO_PKG_VERSION"));

/// CoinGecko public API v3.
pub(crate) const DEFAULT_BASE_COINGECKO: &str = "https://api.coingecko.com/api/v3/";

/// CoinGecko pro plan host; selected when the client is built with `coingecko_pro(true)`.
pub(crate) const DEFAULT_BASE_COINGECKO_PRO: &str = "https://pro-api.coingecko.com/api/v3/";

/// DexScreener public API (no key).
pub(crate) const DEFAULT_BASE_DEXSCREENER: &str = "https://api.dexscreener.com/";

/// GNews v4.
pub(crate) const DEFAULT_BASE_GNEWS: &str = "https://gnews.io/api/v4/";

/// Moralis EVM API v2.2.
pub(crate) const DEFAULT_BASE_MORALIS: &str = "https://deep-index.moralis.io/api/v2.2/";

/// Kaiko market data (US region).
pub(crate) const DEFAULT_BASE_KAIKO: &str = "https://us.market-api.kaiko.io/";

/// Sanity API host; the project id is prepended as a subdomain.
pub(crate) const SANITY_API_HOST: &str = "api.sanity.io";

/// Sanity CDN host used for published, unauthenticated reads.
pub(crate) const SANITY_CDN_HOST: &str = "apicdn.sanity.io";

pub(crate) const DEFAULT_SANITY_DATASET: &str = "production";

pub(crate) const DEFAULT_SANITY_API_VERSION: &str = "2024-01-01";
