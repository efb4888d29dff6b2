use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "marketdash")]
#[command(about = "Stock dashboard builder and publisher", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dashboard for a ticker group and publish it
    Render {
        /// Ticker group to render (overrides TICKER_GROUP)
        #[arg(short, long)]
        group: Option<String>,

        /// History window, e.g. 1y, 5y, max (overrides DATE_RANGE)
        #[arg(short, long)]
        range: Option<String>,

        /// Write the dashboard to this local path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Upload the dashboard to this bucket instead of writing locally
        #[arg(long)]
        bucket: Option<String>,

        /// Object key used with --bucket
        #[arg(long)]
        key: Option<String>,
    },
    /// List configured ticker groups
    Groups,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            group,
            range,
            output,
            bucket,
            key,
        } => {
            commands::render::run(group, range, output, bucket, key);
        }
        Commands::Groups => {
            commands::groups::run();
        }
    }
}
