use std::path::PathBuf;

use tracing::{info, warn};

use crate::charts::render_group;
use crate::config::{Config, OutputMode};
use crate::dashboard::{publish, Dashboard, Destination};
use crate::error::{Error, Result};
use crate::models::DateRange;
use crate::services::MarketDataFetcher;

pub fn run(
    group: Option<String>,
    range: Option<String>,
    output: Option<PathBuf>,
    bucket: Option<String>,
    key: Option<String>,
) {
    match build_and_publish(group, range, output, bucket, key) {
        Ok(Some(destination)) => {
            println!("✅ Dashboard published to {}", destination);
        }
        Ok(None) => {
            println!("⚠️  No data fetched for any ticker; dashboard not published");
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

/// The whole pipeline: resolve -> fetch -> render -> assemble -> publish.
///
/// Per-ticker fetch failures are logged and skipped; resolver and publisher
/// failures abort the run. Returns the destination on publish, None when no
/// ticker produced data.
fn build_and_publish(
    group: Option<String>,
    range: Option<String>,
    output: Option<PathBuf>,
    bucket: Option<String>,
    key: Option<String>,
) -> Result<Option<Destination>> {
    let mut config = Config::from_env()?;

    // CLI flags win over the environment
    if let Some(group) = group {
        config.ticker_group = group;
    }
    if let Some(range) = range {
        config.date_range = DateRange::parse(&range)?;
    }
    if output.is_some() {
        config.output_mode = OutputMode::Local;
        config.output_path = output;
    }
    if bucket.is_some() {
        config.output_mode = OutputMode::Cloud;
        config.output_bucket = bucket;
    }
    if key.is_some() {
        config.output_key = key;
    }

    // Resolve the group before touching the network
    let groups = config.load_groups()?;
    let group_name = config.ticker_group.clone();
    let tickers = groups.resolve(&group_name)?;
    let range = config.date_range;
    let destination = config.destination(&group_name, range)?;

    println!(
        "📊 Building dashboard for group '{}' ({} tickers, range {})",
        group_name,
        tickers.len(),
        range
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Network(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let mut fetcher = MarketDataFetcher::new()?;
        let mut datasets = Vec::new();

        for ticker in &tickers {
            println!("⬇️  Fetching data for: {}", ticker);
            match fetcher.fetch(ticker, range).await {
                Ok(dataset) => {
                    info!(
                        ticker = ticker.as_str(),
                        records = dataset.series.len(),
                        has_financials = !dataset.financials.is_empty(),
                        "Fetched ticker"
                    );
                    datasets.push(dataset);
                }
                Err(e) => {
                    warn!(ticker = ticker.as_str(), error = %e, "Skipping ticker");
                    eprintln!("⚠️  Skipping {}: {}", ticker, e);
                }
            }
        }

        if datasets.is_empty() {
            return Ok(None);
        }

        let figures = render_group(&group_name, range, &datasets);
        let title = format!("{} Financial Dashboard ({})", group_name, range);
        let dashboard = Dashboard::new(title, figures);

        println!(
            "🖼️  Rendered {} charts from {} of {} tickers",
            dashboard.figures.len(),
            datasets.len(),
            tickers.len()
        );

        publish(&dashboard.to_html(), &destination).await?;

        Ok(Some(destination))
    })
}
