//! Server Configuration
//!
//! All settings are read once at startup from the environment and are
//! immutable afterwards.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HTTP_PORT | 3000 | HTTP listen port |
//! | DATABASE_PATH | loja.db | SQLite database file |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | optional directory for daily log files |
//! | JWT_ACCESS_SECRET | (dev fallback) | access-token signing secret |
//! | JWT_REFRESH_SECRET | (dev fallback) | refresh-token signing secret |
//! | JWT_ACCESS_TTL_SECS | 900 | access-token validity window |
//! | JWT_REFRESH_TTL_SECS | 604800 | refresh-token validity window |
//!
//! # Example
//!
//! ```ignore
//! HTTP_PORT=8080 DATABASE_PATH=/data/loja.db cargo run
//! ```

/// Authentication configuration
///
/// Access and refresh credentials are signed with distinct secrets and carry
/// distinct validity windows, so one kind never verifies on the other's path
/// and each kind's exposure is bounded independently.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access-token signing secret (at least 32 bytes)
    pub access_secret: String,
    /// Refresh-token signing secret (at least 32 bytes)
    pub refresh_secret: String,
    /// Access-token time-to-live in seconds
    pub access_ttl_secs: i64,
    /// Refresh-token time-to-live in seconds
    pub refresh_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: load_secret("JWT_ACCESS_SECRET"),
            refresh_secret: load_secret("JWT_REFRESH_SECRET"),
            access_ttl_secs: std::env::var("JWT_ACCESS_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900),
            refresh_ttl_secs: std::env::var("JWT_REFRESH_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604_800),
        }
    }
}

/// Load a signing secret from the environment
///
/// Missing or too-short secrets fall back to an insecure development key in
/// debug builds and abort in release builds.
fn load_secret(var: &str) -> String {
    match std::env::var(var) {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => secret_fallback(var, "shorter than 32 characters"),
        Err(_) => secret_fallback(var, "not set"),
    }
}

#[cfg(debug_assertions)]
fn secret_fallback(var: &str, reason: &str) -> String {
    tracing::warn!("⚠️  {var} {reason}! Using insecure default key. DO NOT USE IN PRODUCTION!");
    format!("dev-{}-change-in-production-min-32-chars", var.to_lowercase())
}

#[cfg(not(debug_assertions))]
fn secret_fallback(var: &str, reason: &str) -> String {
    panic!("🚨 FATAL: {var} is {reason}!");
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Token signing configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "loja.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            auth: AuthConfig::default(),
        }
    }

    /// Override database path and port, keeping the rest from the environment
    ///
    /// Commonly used by tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }
}
