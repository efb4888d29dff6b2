//! Shared constants for fetching and rendering
//!
//! Line-item names are normalized from the provider's timeseries keys
//! ("annualTotalRevenue" -> "TotalRevenue") so chart code never depends on
//! the provider's period-prefix naming.

/// Normalized line-item name for reported revenue
pub const REVENUE_LINE_ITEM: &str = "TotalRevenue";

/// Fundamentals timeseries types requested per ticker
pub const FUNDAMENTAL_TYPES: &[&str] = &["annualTotalRevenue", "annualNetIncome"];

/// Group rendered when neither TICKER_GROUP nor --group is given
pub const DEFAULT_TICKER_GROUP: &str = "us_banks";

/// Provider request ceiling (sliding window, per minute)
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Pinned Plotly.js bundle loaded once per dashboard
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
