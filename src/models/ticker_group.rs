use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Ticker groups organized by sector/category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerGroups {
    #[serde(flatten)]
    pub groups: HashMap<String, Vec<String>>,
}

impl TickerGroups {
    /// Load ticker groups from a JSON file (group name -> list of symbols)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read ticker groups file: {}", e)))?;
        let groups: HashMap<String, Vec<String>> = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid ticker groups file: {}", e)))?;
        Ok(Self { groups })
    }

    /// Built-in default groups
    pub fn defaults() -> Self {
        let mut groups = HashMap::new();
        groups.insert(
            "us_banks".to_string(),
            vec!["JPM", "BAC", "C", "WFC", "GS"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        groups.insert(
            "tech".to_string(),
            vec!["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        groups.insert(
            "energy".to_string(),
            vec!["XOM", "CVX", "COP", "SLB"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        Self { groups }
    }

    /// Resolve a group name to its ordered ticker list.
    ///
    /// Pure lookup, no side effects. Declared ordering is preserved.
    pub fn resolve(&self, group_name: &str) -> Result<Vec<String>> {
        match self.groups.get(group_name) {
            Some(tickers) if !tickers.is_empty() => Ok(tickers.clone()),
            Some(_) => Err(Error::Config(format!(
                "Ticker group '{}' is empty",
                group_name
            ))),
            None => Err(Error::NotFound(format!(
                "Unknown ticker group '{}' (available: {})",
                group_name,
                self.group_names().join(", ")
            ))),
        }
    }

    /// Get all group names, sorted
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
