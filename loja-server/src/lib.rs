//! Loja API - pedidos, produtos e usuários atrás de autenticação JWT
//!
//! # Architecture
//!
//! - **Auth** (`auth`): access/refresh token codec, identity extraction, the
//!   request gate and the ownership policy
//! - **HTTP API** (`api`): routers and handlers
//! - **Database** (`db`): SQLite via sqlx, models and repositories
//! - **Core** (`core`): configuration, shared state, server entry point
//!
//! # Module structure
//!
//! ```text
//! loja-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # token codec, extractor, gate, ownership
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, models, repositories
//! └── utils/         # errors, results, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, TokenService};
pub use core::{AuthConfig, Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
