use finchain::api::start_server;
use finchain::{default_network, OrchestratorConfig};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("FinChain Intelligence Network - API Server");
    info!("Port: {}", api_port);

    let orchestrator = Arc::new(default_network(OrchestratorConfig::from_env()).await);

    info!(
        agents = orchestrator.registered_agents().await.len(),
        "Network initialized"
    );

    start_server(orchestrator, api_port).await?;

    Ok(())
}
