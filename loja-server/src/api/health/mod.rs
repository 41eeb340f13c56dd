//! Health Route - public (no auth required)

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "API RODANDO"
}
