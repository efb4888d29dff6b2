use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration as StdDuration, SystemTime};
use thiserror::Error as ThisError;
use tokio::time::sleep;

use crate::constants::FUNDAMENTAL_TYPES;
use crate::models::{DateRange, FinancialsRecord, Ohlcv, PeriodValue};

#[derive(ThisError, Debug)]
pub enum YahooError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No data available")]
    NoData,
}

/// Yahoo Finance HTTP client
///
/// Single attempt per request: per-ticker resilience is handled upstream by
/// skipping the ticker, not by retrying here.
pub struct YahooClient {
    client: Client,
    base_url: String,
    rate_limit_per_minute: u32,
    request_timestamps: Vec<SystemTime>,
    user_agents: Vec<String>,
    random_agent: bool,
}

impl YahooClient {
    pub fn new(random_agent: bool, rate_limit_per_minute: u32) -> Result<Self, YahooError> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(30))
            .build()?;

        let user_agents = vec![
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0".to_string(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.3 Safari/605.1.15".to_string(),
        ];

        Ok(YahooClient {
            client,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            rate_limit_per_minute,
            request_timestamps: Vec::new(),
            user_agents,
            random_agent,
        })
    }

    fn get_user_agent(&self) -> String {
        if self.random_agent {
            self.user_agents
                .choose(&mut rand::thread_rng())
                .unwrap_or(&self.user_agents[0])
                .clone()
        } else {
            self.user_agents[0].clone()
        }
    }

    /// Sliding-window rate limiting across this client's requests
    async fn enforce_rate_limit(&mut self) {
        let current_time = SystemTime::now();

        // Remove timestamps older than 1 minute
        self.request_timestamps.retain(|&timestamp| {
            current_time
                .duration_since(timestamp)
                .unwrap_or(StdDuration::from_secs(0))
                < StdDuration::from_secs(60)
        });

        // If we're at the rate limit, wait until the oldest request expires
        if self.request_timestamps.len() >= self.rate_limit_per_minute as usize {
            if let Some(&oldest_request) = self.request_timestamps.first() {
                let wait_time = StdDuration::from_secs(60)
                    - current_time
                        .duration_since(oldest_request)
                        .unwrap_or(StdDuration::from_secs(0));
                if !wait_time.is_zero() {
                    sleep(wait_time + StdDuration::from_millis(100)).await;
                }
            }
        }

        self.request_timestamps.push(current_time);
    }

    async fn make_request(&mut self, url: &str, query: &[(&str, &str)]) -> Result<Value, YahooError> {
        self.enforce_rate_limit().await;

        let user_agent = self.get_user_agent();

        tracing::debug!(url = url, query = ?query, "Provider request");

        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json, text/plain, */*")
            .header("User-Agent", &user_agent)
            .send()
            .await?;

        let status = response.status();
        if status == 404 {
            return Err(YahooError::NoData);
        }
        if !status.is_success() {
            return Err(YahooError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;
        Ok(data)
    }

    /// Fetch daily OHLCV history for one symbol over the requested range
    pub async fn get_history(
        &mut self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<Ohlcv>, YahooError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let query = [("range", range.as_query()), ("interval", "1d")];

        let response_data = self.make_request(&url, &query).await?;

        tracing::debug!(
            symbol = symbol,
            "Chart raw response: {}",
            serde_json::to_string(&response_data).unwrap_or_else(|_| "invalid json".to_string())
        );

        parse_chart_response(&response_data)
    }

    /// Fetch annual fundamentals (revenue, net income) for one symbol
    pub async fn get_fundamentals(
        &mut self,
        symbol: &str,
    ) -> Result<FinancialsRecord, YahooError> {
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}",
            self.base_url, symbol
        );

        // Annual statements only go back so far; a 10-year window covers
        // everything the endpoint will return
        let period2 = Utc::now().timestamp();
        let period1 = (Utc::now() - ChronoDuration::days(365 * 10)).timestamp();
        let period1_str = period1.to_string();
        let period2_str = period2.to_string();
        let types = FUNDAMENTAL_TYPES.join(",");

        let query = [
            ("symbol", symbol),
            ("type", types.as_str()),
            ("period1", period1_str.as_str()),
            ("period2", period2_str.as_str()),
        ];

        let response_data = self.make_request(&url, &query).await?;

        parse_timeseries_response(symbol, &response_data)
    }
}

/// Parse the chart endpoint's column-array payload into OHLCV records.
///
/// Rows with a null price in any of open/high/low/close are dropped (the
/// provider emits them for non-trading sessions).
pub fn parse_chart_response(response: &Value) -> Result<Vec<Ohlcv>, YahooError> {
    let chart = response
        .get("chart")
        .ok_or_else(|| YahooError::InvalidResponse("Missing key: chart".to_string()))?;

    if let Some(error) = chart.get("error") {
        if !error.is_null() {
            let code = error.get("code").and_then(|v| v.as_str()).unwrap_or("unknown");
            if code.eq_ignore_ascii_case("not found") {
                return Err(YahooError::NoData);
            }
            return Err(YahooError::InvalidResponse(format!(
                "Provider error: {}",
                code
            )));
        }
    }

    let result = chart
        .get("result")
        .and_then(|v| v.as_array())
        .filter(|a| !a.is_empty())
        .ok_or(YahooError::NoData)?;

    let data_item = &result[0];

    let times = data_item
        .get("timestamp")
        .and_then(|v| v.as_array())
        .ok_or(YahooError::NoData)?;

    let quote = data_item
        .get("indicators")
        .and_then(|v| v.get("quote"))
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| YahooError::InvalidResponse("Missing key: indicators.quote".to_string()))?;

    let required_keys = ["open", "high", "low", "close", "volume"];
    for key in &required_keys {
        if quote.get(key).is_none() {
            return Err(YahooError::InvalidResponse(format!("Missing key: {}", key)));
        }
    }

    let opens = quote["open"]
        .as_array()
        .ok_or_else(|| YahooError::InvalidResponse("Invalid opens".to_string()))?;
    let highs = quote["high"]
        .as_array()
        .ok_or_else(|| YahooError::InvalidResponse("Invalid highs".to_string()))?;
    let lows = quote["low"]
        .as_array()
        .ok_or_else(|| YahooError::InvalidResponse("Invalid lows".to_string()))?;
    let closes = quote["close"]
        .as_array()
        .ok_or_else(|| YahooError::InvalidResponse("Invalid closes".to_string()))?;
    let volumes = quote["volume"]
        .as_array()
        .ok_or_else(|| YahooError::InvalidResponse("Invalid volumes".to_string()))?;

    let length = times.len();
    if [opens.len(), highs.len(), lows.len(), closes.len(), volumes.len()]
        .iter()
        .any(|&len| len != length)
    {
        return Err(YahooError::InvalidResponse(
            "Inconsistent array lengths".to_string(),
        ));
    }

    let mut candles = Vec::new();

    for i in 0..length {
        let timestamp = times[i].as_i64().ok_or_else(|| {
            YahooError::InvalidResponse(format!("Invalid timestamp at index {}", i))
        })?;

        let time = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
            YahooError::InvalidResponse(format!(
                "Cannot convert timestamp {} to DateTime at index {}",
                timestamp, i
            ))
        })?;

        // Null row: no trade data for this session
        let (open, high, low, close) = match (
            opens[i].as_f64(),
            highs[i].as_f64(),
            lows[i].as_f64(),
            closes[i].as_f64(),
        ) {
            (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
            _ => continue,
        };

        candles.push(Ohlcv {
            time,
            open,
            high,
            low,
            close,
            volume: volumes[i].as_u64().unwrap_or(0),
        });
    }

    if candles.is_empty() {
        return Err(YahooError::NoData);
    }

    candles.sort_by(|a, b| a.time.cmp(&b.time));
    Ok(candles)
}

/// Parse the fundamentals timeseries payload into a FinancialsRecord.
///
/// Line-item names are normalized by stripping the period prefix
/// ("annualTotalRevenue" -> "TotalRevenue").
pub fn parse_timeseries_response(
    symbol: &str,
    response: &Value,
) -> Result<FinancialsRecord, YahooError> {
    let timeseries = response
        .get("timeseries")
        .ok_or_else(|| YahooError::InvalidResponse("Missing key: timeseries".to_string()))?;

    if let Some(error) = timeseries.get("error") {
        if !error.is_null() {
            return Err(YahooError::NoData);
        }
    }

    let results = timeseries
        .get("result")
        .and_then(|v| v.as_array())
        .ok_or(YahooError::NoData)?;

    let mut items: HashMap<String, Vec<PeriodValue>> = HashMap::new();

    for entry in results {
        let Some(obj) = entry.as_object() else {
            continue;
        };

        // The reported values live under the key named after the series type
        let Some(series_type) = obj
            .get("meta")
            .and_then(|m| m.get("type"))
            .and_then(|t| t.as_array())
            .and_then(|a| a.first())
            .and_then(|v| v.as_str())
        else {
            continue;
        };

        let Some(values) = obj.get(series_type).and_then(|v| v.as_array()) else {
            continue;
        };

        let mut period_values = Vec::new();
        for value in values {
            let Some(period) = value.get("asOfDate").and_then(|v| v.as_str()) else {
                continue;
            };
            let Some(raw) = value
                .get("reportedValue")
                .and_then(|v| v.get("raw"))
                .and_then(|v| v.as_f64())
            else {
                continue;
            };
            period_values.push(PeriodValue::new(period, raw));
        }

        if !period_values.is_empty() {
            items.insert(normalize_line_item(series_type), period_values);
        }
    }

    Ok(FinancialsRecord::new(symbol.to_string(), items))
}

fn normalize_line_item(series_type: &str) -> String {
    series_type
        .strip_prefix("annual")
        .or_else(|| series_type.strip_prefix("quarterly"))
        .or_else(|| series_type.strip_prefix("trailing"))
        .unwrap_or(series_type)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REVENUE_LINE_ITEM;
    use serde_json::json;

    fn chart_fixture(timestamps: Vec<i64>, closes: Vec<Value>) -> Value {
        let n = timestamps.len();
        let filled: Vec<Value> = (0..n).map(|i| closes[i].clone()).collect();
        json!({
            "chart": {
                "result": [{
                    "meta": {"symbol": "JPM"},
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{
                            "open": filled.clone(),
                            "high": filled.clone(),
                            "low": filled.clone(),
                            "close": filled,
                            "volume": vec![1000u64; n],
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn test_parse_chart_response() {
        let fixture = chart_fixture(
            vec![1_700_000_000, 1_700_086_400],
            vec![json!(150.0), json!(151.5)],
        );

        let candles = parse_chart_response(&fixture).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 150.0);
        assert!(candles[0].time < candles[1].time);
    }

    #[test]
    fn test_parse_chart_response_drops_null_rows() {
        let fixture = chart_fixture(
            vec![1_700_000_000, 1_700_086_400, 1_700_172_800],
            vec![json!(150.0), json!(null), json!(152.0)],
        );

        let candles = parse_chart_response(&fixture).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, 152.0);
    }

    #[test]
    fn test_parse_chart_response_unknown_symbol_is_no_data() {
        let fixture = json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        });

        assert!(matches!(
            parse_chart_response(&fixture),
            Err(YahooError::NoData)
        ));
    }

    #[test]
    fn test_parse_chart_response_all_null_is_no_data() {
        let fixture = chart_fixture(vec![1_700_000_000], vec![json!(null)]);
        assert!(matches!(
            parse_chart_response(&fixture),
            Err(YahooError::NoData)
        ));
    }

    #[test]
    fn test_parse_timeseries_response() {
        let fixture = json!({
            "timeseries": {
                "result": [{
                    "meta": {"symbol": ["JPM"], "type": ["annualTotalRevenue"]},
                    "timestamp": [1_672_444_800u64, 1_703_980_800u64],
                    "annualTotalRevenue": [
                        {
                            "asOfDate": "2022-12-31",
                            "periodType": "12M",
                            "reportedValue": {"raw": 128_695_000_000.0, "fmt": "128.7B"}
                        },
                        {
                            "asOfDate": "2023-12-31",
                            "periodType": "12M",
                            "reportedValue": {"raw": 158_104_000_000.0, "fmt": "158.1B"}
                        }
                    ]
                }],
                "error": null
            }
        });

        let record = parse_timeseries_response("JPM", &fixture).unwrap();
        let revenue = record.revenue().unwrap();
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].period, "2022-12-31");
        assert_eq!(revenue[1].value, 158_104_000_000.0);
    }

    #[test]
    fn test_parse_timeseries_missing_values_yields_empty_record() {
        let fixture = json!({
            "timeseries": {"result": [], "error": null}
        });

        let record = parse_timeseries_response("JPM", &fixture).unwrap();
        assert!(record.is_empty());
        assert!(record.line_item(REVENUE_LINE_ITEM).is_none());
    }

    #[test]
    fn test_normalize_line_item() {
        assert_eq!(normalize_line_item("annualTotalRevenue"), "TotalRevenue");
        assert_eq!(normalize_line_item("quarterlyNetIncome"), "NetIncome");
        assert_eq!(normalize_line_item("TotalRevenue"), "TotalRevenue");
    }
}
