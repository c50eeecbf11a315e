use anyhow::Result;
use clap::Parser;

use varsync::cli::args::{Args, Commands};
use varsync::commands;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Serve { bind } => commands::serve::execute_serve(&bind).await,
        Commands::Sync {
            product_id,
            from_file,
            dry_run,
        } => commands::sync::execute_sync(product_id, from_file, dry_run).await,
    }
}
