mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use scrub_config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::Extract(cmd) => commands::extract::handle(cmd, &config),
        cli::Commands::Repair(cmd) => commands::repair::handle(cmd, &config),
        cli::Commands::Scan(cmd) => commands::scan::handle(cmd, &config),
        cli::Commands::Mask(cmd) => commands::mask::handle(cmd, &config),
    }
}
