//! Runtime configuration read from the environment.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{debug, info};

use crate::core::{BelugaClient, BelugaError, Upstream};

/// Everything the server needs, with defaults for the optional parts.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub coingecko_api_key: Option<String>,
    pub coingecko_pro: bool,
    pub gnews_api_key: Option<String>,
    pub moralis_api_key: Option<String>,
    pub kaiko_api_key: Option<String>,
    pub sanity_project_id: Option<String>,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_token: Option<String>,
    /// Zero disables the response cache.
    pub cache_ttl: Duration,
    pub timeout: Duration,
    /// Token whose transfers feed `/api/transactions` when the caller names none.
    pub demo_token: Option<String>,
    pub demo_chain: String,
}

// Keys are secrets; keep them out of logs.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |o: &Option<String>| if o.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("coingecko_api_key", &set(&self.coingecko_api_key))
            .field("coingecko_pro", &self.coingecko_pro)
            .field("gnews_api_key", &set(&self.gnews_api_key))
            .field("moralis_api_key", &set(&self.moralis_api_key))
            .field("kaiko_api_key", &set(&self.kaiko_api_key))
            .field("sanity_project_id", &self.sanity_project_id)
            .field("sanity_dataset", &self.sanity_dataset)
            .field("sanity_api_version", &self.sanity_api_version)
            .field("sanity_token", &set(&self.sanity_token))
            .field("cache_ttl", &self.cache_ttl)
            .field("timeout", &self.timeout)
            .field("demo_token", &self.demo_token)
            .field("demo_chain", &self.demo_chain)
            .finish()
    }
}

impl ServerConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// `BelugaError::Config` when a variable is set but cannot be parsed.
    pub fn load() -> Result<Self, BelugaError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which stands in for the environment.
    ///
    /// # Errors
    ///
    /// `BelugaError::Config` when a value is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BelugaError> {
        let secret = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            bind: try_load(&lookup, "BELUGA_BIND", "0.0.0.0")?,
            port: try_load(&lookup, "BELUGA_PORT", "3000")?,
            coingecko_api_key: secret("COINGECKO_API_KEY"),
            coingecko_pro: try_load(&lookup, "COINGECKO_PRO", "false")?,
            gnews_api_key: secret("GNEWS_API_KEY"),
            moralis_api_key: secret("MORALIS_API_KEY"),
            kaiko_api_key: secret("KAIKO_API_KEY"),
            sanity_project_id: secret("SANITY_PROJECT_ID"),
            sanity_dataset: try_load(&lookup, "SANITY_DATASET", "production")?,
            sanity_api_version: try_load(&lookup, "SANITY_API_VERSION", "2024-01-01")?,
            sanity_token: secret("SANITY_TOKEN"),
            cache_ttl: Duration::from_secs(try_load(&lookup, "BELUGA_CACHE_TTL_SECS", "30")?),
            timeout: Duration::from_secs(try_load(&lookup, "BELUGA_TIMEOUT_SECS", "15")?),
            demo_token: secret("BELUGA_DEMO_TOKEN"),
            demo_chain: try_load(&lookup, "BELUGA_DEMO_CHAIN", "eth")?,
        })
    }

    /// The address the server binds to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Builds the shared upstream client from this configuration.
    ///
    /// # Errors
    ///
    /// Propagates `BelugaClientBuilder::build` failures.
    pub fn client(&self) -> Result<BelugaClient, BelugaError> {
        let mut builder = BelugaClient::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(5))
            .coingecko_pro(self.coingecko_pro)
            .sanity_dataset(self.sanity_dataset.clone())
            .sanity_api_version(self.sanity_api_version.clone());

        let keys = [
            (Upstream::CoinGecko, &self.coingecko_api_key),
            (Upstream::GNews, &self.gnews_api_key),
            (Upstream::Moralis, &self.moralis_api_key),
            (Upstream::Kaiko, &self.kaiko_api_key),
            (Upstream::Sanity, &self.sanity_token),
        ];
        for (upstream, key) in keys {
            match key {
                Some(k) => builder = builder.api_key(upstream, k.clone()),
                None => debug!(%upstream, "no API key configured"),
            }
        }

        if let Some(project) = &self.sanity_project_id {
            builder = builder.sanity_project(project.clone());
        }
        if !self.cache_ttl.is_zero() {
            builder = builder.cache_ttl(self.cache_ttl);
        }

        builder.build()
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, BelugaError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| BelugaError::Config(format!("invalid {key} value {raw:?}: {e}")))
}
