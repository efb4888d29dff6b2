mod charts;
mod cli;
mod commands;
mod config;
mod constants;
mod dashboard;
mod error;
mod models;
mod services;

use tracing_subscriber::EnvFilter;

fn main() {
    // Credentials and destinations may come from a .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    cli::run();
}
