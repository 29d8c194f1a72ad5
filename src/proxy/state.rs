use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::{BelugaClient, BelugaError};

pub struct AppState {
    pub client: BelugaClient,
    pub config: ServerConfig,
}

impl AppState {
    /// # Errors
    ///
    /// Fails when the upstream client cannot be built from `config`.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, BelugaError> {
        let client = config.client()?;
        Ok(Arc::new(Self { client, config }))
    }

    /// State around an already-built client (tests point it at mock upstreams).
    pub fn with_client(client: BelugaClient, config: ServerConfig) -> Arc<Self> {
        Arc::new(Self { client, config })
    }
}
