use loja_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    dotenv::dotenv().ok();
    loja_server::init_logger();

    tracing::info!("Loja API starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize state (database, token service)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
