use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_TICKER_GROUP;
use crate::dashboard::Destination;
use crate::error::{Error, Result};
use crate::models::{DateRange, TickerGroups};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Local,
    Cloud,
}

/// Run configuration resolved from the environment; CLI flags override
/// individual fields afterwards. Cloud credentials are not read here, the
/// storage SDK resolves them from the environment on its own.
#[derive(Debug, Clone)]
pub struct Config {
    pub ticker_group: String,
    pub date_range: DateRange,
    pub output_mode: OutputMode,
    pub output_path: Option<PathBuf>,
    pub output_bucket: Option<String>,
    pub output_key: Option<String>,
    pub groups_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let output_mode = match env::var("OUTPUT_MODE")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => OutputMode::Local,
            "cloud" => OutputMode::Cloud,
            other => {
                return Err(Error::Config(format!(
                    "Invalid OUTPUT_MODE '{}' (valid: local, cloud)",
                    other
                )))
            }
        };

        let date_range = match env::var("DATE_RANGE") {
            Ok(s) => DateRange::parse(&s)?,
            Err(_) => DateRange::default(),
        };

        Ok(Self {
            ticker_group: env::var("TICKER_GROUP")
                .unwrap_or_else(|_| DEFAULT_TICKER_GROUP.to_string()),
            date_range,
            output_mode,
            output_path: env::var("OUTPUT_PATH").ok().map(PathBuf::from),
            output_bucket: env::var("OUTPUT_BUCKET").ok(),
            output_key: env::var("OUTPUT_KEY").ok(),
            groups_file: env::var("TICKER_GROUPS_FILE").ok().map(PathBuf::from),
        })
    }

    /// Group definitions: the configured JSON file, or the built-in defaults
    pub fn load_groups(&self) -> Result<TickerGroups> {
        match &self.groups_file {
            Some(path) => TickerGroups::from_file(path),
            None => Ok(TickerGroups::defaults()),
        }
    }

    /// Default artifact name, e.g. "us_banks_dashboard_5y.html"
    pub fn default_artifact_name(group: &str, range: DateRange) -> String {
        format!(
            "{}_dashboard_{}.html",
            group.to_lowercase().replace([' ', '/'], "_"),
            range
        )
    }

    /// The destination this run publishes to
    pub fn destination(&self, group: &str, range: DateRange) -> Result<Destination> {
        match self.output_mode {
            OutputMode::Local => {
                let path = self
                    .output_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(Self::default_artifact_name(group, range)));
                Ok(Destination::LocalPath(path))
            }
            OutputMode::Cloud => {
                let bucket = self.output_bucket.clone().ok_or_else(|| {
                    Error::Config("OUTPUT_BUCKET is required when OUTPUT_MODE=cloud".to_string())
                })?;
                let key = self
                    .output_key
                    .clone()
                    .unwrap_or_else(|| Self::default_artifact_name(group, range));
                Ok(Destination::CloudObject { bucket, key })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(mode: OutputMode) -> Config {
        Config {
            ticker_group: "us_banks".to_string(),
            date_range: DateRange::Year5,
            output_mode: mode,
            output_path: None,
            output_bucket: None,
            output_key: None,
            groups_file: None,
        }
    }

    #[test]
    fn test_default_artifact_name() {
        assert_eq!(
            Config::default_artifact_name("US Banks", DateRange::Year5),
            "us_banks_dashboard_5y.html"
        );
    }

    #[test]
    fn test_local_destination_defaults_to_artifact_name() {
        let config = base_config(OutputMode::Local);
        let destination = config.destination("us_banks", DateRange::Year5).unwrap();
        assert_eq!(
            destination,
            Destination::LocalPath(PathBuf::from("us_banks_dashboard_5y.html"))
        );
    }

    #[test]
    fn test_cloud_destination_requires_bucket() {
        let config = base_config(OutputMode::Cloud);
        assert!(matches!(
            config.destination("us_banks", DateRange::Year5),
            Err(Error::Config(_))
        ));

        let mut config = base_config(OutputMode::Cloud);
        config.output_bucket = Some("reports".to_string());
        let destination = config.destination("us_banks", DateRange::Year5).unwrap();
        assert_eq!(
            destination,
            Destination::CloudObject {
                bucket: "reports".to_string(),
                key: "us_banks_dashboard_5y.html".to_string(),
            }
        );
    }
}
