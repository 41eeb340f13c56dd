//! Core Module
//!
//! Configuration, shared state and the HTTP server entry point.

pub mod config;
pub mod server;
pub mod state;

pub use config::{AuthConfig, Config};
pub use server::Server;
pub use state::ServerState;
