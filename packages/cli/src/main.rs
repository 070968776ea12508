use clap::Parser;

use todo_cli::cli::Cli;
use todo_cli::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    todo_cli::logging::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(&cli);

    todo_cli::run_server(config).await
}
