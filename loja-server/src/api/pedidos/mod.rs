//! Pedido API Module
//!
//! Protected routes require authentication and, on reads and mutations,
//! ownership. The `PATCH /pedidos/{id}` status route is served by
//! [`public_router`] and is deliberately unauthenticated (see
//! `auth::middleware::is_public_route`).

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/pedidos", get(handler::list).post(handler::create))
        .route(
            "/pedidos/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}

/// Public exception route - external integrations mark a pedido's status
/// without credentials
pub fn public_router() -> Router<ServerState> {
    Router::new().route("/pedidos/{id}", patch(handler::update_status))
}
