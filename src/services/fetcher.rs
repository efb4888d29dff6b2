use tracing::warn;

use crate::constants::DEFAULT_RATE_LIMIT_PER_MINUTE;
use crate::error::{Error, Result};
use crate::models::{DateRange, FinancialsRecord, PriceSeries};
use crate::services::yahoo::{YahooClient, YahooError};

/// Everything fetched for one ticker in one run
#[derive(Debug, Clone)]
pub struct TickerDataset {
    pub series: PriceSeries,
    pub financials: FinancialsRecord,
}

impl TickerDataset {
    pub fn symbol(&self) -> &str {
        &self.series.symbol
    }
}

/// Per-ticker data fetcher backed by the Yahoo Finance client
pub struct MarketDataFetcher {
    client: YahooClient,
}

impl MarketDataFetcher {
    pub fn new() -> Result<Self> {
        let client = YahooClient::new(true, DEFAULT_RATE_LIMIT_PER_MINUTE)
            .map_err(|e| Error::Config(format!("Failed to create provider client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch the price series and fundamentals for one ticker.
    ///
    /// A ticker with no price history is unavailable and gets skipped by the
    /// caller. Missing fundamentals alone do not fail the ticker; the revenue
    /// chart simply omits it.
    pub async fn fetch(&mut self, symbol: &str, range: DateRange) -> Result<TickerDataset> {
        let candles = self
            .client
            .get_history(symbol, range)
            .await
            .map_err(|e| match e {
                YahooError::NoData => {
                    Error::DataUnavailable(format!("No price history for {}", symbol))
                }
                other => Error::DataUnavailable(format!(
                    "Price fetch failed for {}: {}",
                    symbol, other
                )),
            })?;

        let series = PriceSeries::new(symbol.to_string(), candles);

        let financials = match self.client.get_fundamentals(symbol).await {
            Ok(record) => record,
            Err(e) => {
                warn!(ticker = symbol, error = %e, "Fundamentals fetch failed, continuing without them");
                FinancialsRecord::empty(symbol.to_string())
            }
        };

        Ok(TickerDataset { series, financials })
    }
}
