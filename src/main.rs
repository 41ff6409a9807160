use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobharvest::app::AppContext;
use jobharvest::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config)?;

    match cli.command {
        Commands::Run(args) => {
            commands::run(&ctx, &args).await?;
        }
        Commands::Config => {
            commands::show_config(&ctx)?;
        }
    }

    Ok(())
}
