//! Auth API Module
//!
//! - /auth/register, /auth/login, /auth/refresh: public (credential issuance)
//! - /auth/me: protected (requires auth)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/auth/register", post(handler::register))
        .route("/auth/login", post(handler::login))
        .route("/auth/refresh", post(handler::refresh))
        .route("/auth/me", get(handler::me))
}
