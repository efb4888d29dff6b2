use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// History window requested from the data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    /// Last month
    Month1,
    /// Last 3 months
    Month3,
    /// Last 6 months
    Month6,
    /// Last year
    Year1,
    /// Last 2 years
    Year2,
    /// Last 5 years
    Year5,
    /// Last 10 years
    Year10,
    /// Year to date
    Ytd,
    /// Maximum available history
    Max,
}

impl DateRange {
    /// Parse a range string as configured via DATE_RANGE or --range
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(DateRange::Month1),
            "3mo" => Ok(DateRange::Month3),
            "6mo" => Ok(DateRange::Month6),
            "1y" => Ok(DateRange::Year1),
            "2y" => Ok(DateRange::Year2),
            "5y" => Ok(DateRange::Year5),
            "10y" => Ok(DateRange::Year10),
            "ytd" => Ok(DateRange::Ytd),
            "max" => Ok(DateRange::Max),
            other => Err(Error::Config(format!(
                "Invalid date range '{}' (valid: 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)",
                other
            ))),
        }
    }

    /// Query parameter value understood by the provider's chart endpoint
    pub fn as_query(&self) -> &'static str {
        match self {
            DateRange::Month1 => "1mo",
            DateRange::Month3 => "3mo",
            DateRange::Month6 => "6mo",
            DateRange::Year1 => "1y",
            DateRange::Year2 => "2y",
            DateRange::Year5 => "5y",
            DateRange::Year10 => "10y",
            DateRange::Ytd => "ytd",
            DateRange::Max => "max",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::Year5
    }
}
