use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "varsync")]
#[command(about = "Keep AI-written product descriptions in sync with catalog variant data")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Listen for product update webhooks and sync descriptions
    Serve {
        /// Address to bind the listener to
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// Re-sync the variant summary for a single product
    Sync {
        /// Product id in the catalog store
        #[arg(long, conflicts_with = "from_file")]
        product_id: Option<i64>,

        /// Read the product snapshot from a JSON file and preview the result
        #[arg(long)]
        from_file: Option<PathBuf>,

        /// Show the patched description without persisting it
        #[arg(long)]
        dry_run: bool,
    },
}
