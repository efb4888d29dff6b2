mod date_range;
mod financials;
mod ohlcv;
mod ticker_group;

pub use date_range::DateRange;
pub use financials::{FinancialsRecord, PeriodValue};
pub use ohlcv::{Ohlcv, PriceSeries};
pub use ticker_group::TickerGroups;
