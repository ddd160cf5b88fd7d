use clap::Parser;
use colored::*;
use gitfolio::cli::Cli;
use gitfolio::error::Result;
use gitfolio::github::GitHubClient;
use gitfolio::server::{start_server, AppState};
use gitfolio::service::PortfolioService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "Gitfolio Portfolio Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let client = GitHubClient::with_options(&cli.api_url, &cli.user_agent, cli.timeout())?;
    info!("Using GitHub API at {}", client.base_url());

    let service = PortfolioService::new(Arc::new(client));
    let state = AppState::new(service);

    println!("✅ Serving portfolios on http://{}", cli.bind);
    println!("\nPress Ctrl+C to stop the server\n");

    start_server(state, cli.bind, async {
        tokio::signal::ctrl_c().await.ok();
        println!("\n🛑 Shutting down server...");
    })
    .await?;

    println!("✅ Server stopped");

    Ok(())
}
