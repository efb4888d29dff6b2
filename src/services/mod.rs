mod fetcher;
pub mod yahoo;

pub use fetcher::{MarketDataFetcher, TickerDataset};
pub use yahoo::{YahooClient, YahooError};
