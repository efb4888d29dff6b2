use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Basic OHLCV (Open, High, Low, Close, Volume) data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Timestamp of the data point
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: u64,
}

impl Ohlcv {
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Historical price series for a single ticker, ordered by date ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Ticker symbol
    pub symbol: String,

    /// Daily candles, oldest first
    pub candles: Vec<Ohlcv>,
}

impl PriceSeries {
    pub fn new(symbol: String, mut candles: Vec<Ohlcv>) -> Self {
        candles.sort_by(|a, b| a.time.cmp(&b.time));
        Self { symbol, candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Closing prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Dates formatted as YYYY-MM-DD, in order
    pub fn dates(&self) -> Vec<String> {
        self.candles
            .iter()
            .map(|c| c.time.format("%Y-%m-%d").to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle(day: u32, close: f64) -> Ohlcv {
        let time = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        Ohlcv::new(time, close, close, close, close, 1000)
    }

    #[test]
    fn test_series_sorted_on_construction() {
        let series = PriceSeries::new(
            "AAPL".to_string(),
            vec![candle(3, 12.0), candle(1, 10.0), candle(2, 11.0)],
        );

        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(
            series.dates(),
            vec!["2024-01-01", "2024-01-02", "2024-01-03"]
        );
    }
}
