//! Produto API Module - authentication required
//!
//! Reads are unscoped: any authenticated user sees every product. Ownership
//! is enforced only on update and delete.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/produtos", get(handler::list).post(handler::create))
        .route(
            "/produtos/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
