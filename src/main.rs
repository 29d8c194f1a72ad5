use beluga::{ServerConfig, proxy};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };
    tracing::info!(?config, "configuration loaded");

    if let Err(e) = proxy::serve(config).await {
        error!("server failed: {e}");
        std::process::exit(1);
    }
}
