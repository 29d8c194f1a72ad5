//! The HTTP server: same-origin proxy routes plus shaped widget endpoints.

pub mod error;
pub mod forward;
pub mod routes;
pub mod state;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::core::BelugaError;

pub use error::ProxyError;
pub use state::AppState;

/// All routes, with CORS for `GET`/`OPTIONS`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/coingecko/{*path}", get(forward::coingecko))
        .route("/api/dexscreener/{*path}", get(forward::dexscreener))
        .route("/api/gnews/{*path}", get(forward::gnews))
        .route("/api/sanity/{*path}", get(forward::sanity))
        .route("/api/markets", get(routes::markets))
        .route("/api/heatmap", get(routes::heatmap))
        .route("/api/ticker", get(routes::ticker))
        .route("/api/news", get(routes::news))
        .route("/api/transactions", get(routes::transactions))
        .route("/api/articles", get(routes::articles))
        .route("/api/articles/{slug}", get(routes::article))
        .layer(cors)
        .with_state(state)
}

/// Binds `config.address()` and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Fails when the client cannot be built, the address cannot be bound, or the server
/// stops with an I/O error.
pub async fn serve(config: ServerConfig) -> Result<(), BelugaError> {
    info!("Initializing state...");
    let address = config.address();
    let state = AppState::new(config)?;

    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
