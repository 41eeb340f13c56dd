//! Server State
//!
//! [`ServerState`] holds the shared, immutable services every request sees:
//! the configuration, the database pool and the token service. Cloning is
//! shallow (`Arc` / pool handles).

use std::sync::Arc;

use crate::auth::TokenService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Database service owning the SQLite pool
    pub db: DbService,
    /// Token issuance/verification service
    pub tokens: Arc<TokenService>,
}

impl ServerState {
    /// Open the database, run migrations and build the token service
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        let tokens = Arc::new(TokenService::new(&config.auth));

        Ok(Self {
            config: config.clone(),
            db,
            tokens,
        })
    }

    /// Token service accessor
    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }
}
