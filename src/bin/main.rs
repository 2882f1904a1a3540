use finchain::{default_network, OrchestratorConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    info!("FinChain Intelligence Network starting");

    let orchestrator = default_network(OrchestratorConfig::from_env()).await;

    println!("=== FinChain Intelligence Network ===");
    println!("Registered agents:");
    for name in orchestrator.registered_agents().await {
        println!("  - {}", name);
    }

    // One-shot mode: query passed as CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let query = args.join(" ");
        let response = orchestrator.process_query(&query).await?;
        println!("\n{}", response);
        return Ok(());
    }

    // Interactive mode
    println!("\nType a query, or 'exit' to quit.\n");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "exit" | "quit" | "q") {
            break;
        }

        match orchestrator.process_query(query).await {
            Ok(response) => println!("\n{}", response),
            Err(e) => eprintln!("Query failed: {}", e),
        }
    }

    println!("Goodbye.");
    Ok(())
}
