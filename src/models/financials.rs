use crate::constants::REVENUE_LINE_ITEM;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single reported value for one fiscal period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    /// Period end date, YYYY-MM-DD
    pub period: String,

    /// Reported value in the provider's currency
    pub value: f64,
}

impl PeriodValue {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            value,
        }
    }

    /// Fiscal year label for chart axes (periods are YYYY-MM-DD)
    pub fn year_label(&self) -> String {
        self.period.chars().take(4).collect()
    }
}

/// Fundamental statement data for a single ticker: line-item name mapped to
/// its reported values, oldest period first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialsRecord {
    /// Ticker symbol
    pub symbol: String,

    /// Statement line items (e.g. "TotalRevenue" -> yearly values)
    pub items: HashMap<String, Vec<PeriodValue>>,
}

impl FinancialsRecord {
    pub fn new(symbol: String, items: HashMap<String, Vec<PeriodValue>>) -> Self {
        let mut record = Self { symbol, items };
        for values in record.items.values_mut() {
            values.sort_by(|a, b| a.period.cmp(&b.period));
        }
        record
    }

    /// Record with no line items, used when the provider has no fundamentals
    pub fn empty(symbol: String) -> Self {
        Self {
            symbol,
            items: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(|v| v.is_empty())
    }

    /// Values for one line item, oldest period first
    pub fn line_item(&self, name: &str) -> Option<&[PeriodValue]> {
        self.items.get(name).map(|v| v.as_slice()).filter(|v| !v.is_empty())
    }

    /// Reported revenue per period, if the provider returned any
    pub fn revenue(&self) -> Option<&[PeriodValue]> {
        self.line_item(REVENUE_LINE_ITEM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_sorted_on_construction() {
        let mut items = HashMap::new();
        items.insert(
            REVENUE_LINE_ITEM.to_string(),
            vec![
                PeriodValue::new("2023-12-31", 30.0),
                PeriodValue::new("2021-12-31", 10.0),
                PeriodValue::new("2022-12-31", 20.0),
            ],
        );

        let record = FinancialsRecord::new("JPM".to_string(), items);
        let revenue = record.revenue().unwrap();

        assert_eq!(revenue[0].period, "2021-12-31");
        assert_eq!(revenue[2].value, 30.0);
        assert_eq!(revenue[0].year_label(), "2021");
    }

    #[test]
    fn test_empty_record_has_no_revenue() {
        let record = FinancialsRecord::empty("JPM".to_string());
        assert!(record.is_empty());
        assert!(record.revenue().is_none());
    }
}
