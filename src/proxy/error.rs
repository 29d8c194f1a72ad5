use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::core::BelugaError;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] BelugaError),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(e) => match e {
                BelugaError::MissingApiKey(_) | BelugaError::Config(_) | BelugaError::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                BelugaError::Data(_) => StatusCode::BAD_REQUEST,
                BelugaError::Http(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                BelugaError::Http(_) | BelugaError::Json(_) | BelugaError::Url(_) => {
                    StatusCode::BAD_GATEWAY
                }
                other => other
                    .upstream_status()
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
            },
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, %status, "proxy request failed");
        }

        let message = match &self {
            Self::Upstream(BelugaError::MissingApiKey(upstream)) => {
                format!("{upstream} API key is not configured")
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message, "status": status.as_u16() }))).into_response()
    }
}
