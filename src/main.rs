use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotwise_cli::commands::Cli;
use slotwise_cli::config::AppConfig;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env()?;
    slotwise_cli::init_tracing(&config)?;

    let cli = Cli::parse();
    slotwise_cli::run(cli, config)?;

    Ok(())
}
