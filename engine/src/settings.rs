use call_detector::{DestinationFilter, DetectorConfig};
use chrono::Duration;
use config::{Config, ConfigError, File};
use serde::Deserialize;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    /// Upper bound on concurrently processed vessel partitions.
    pub num_workers: u32,
    pub detection: DetectionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionSettings {
    pub confirmation_reports: u32,
    #[serde(with = "humantime_serde")]
    pub min_dwell: std::time::Duration,
    #[serde(with = "humantime_serde")]
    pub max_open_call_age: std::time::Duration,
    /// Vessels without an open call silent for longer than this have their
    /// state dropped after a run.
    #[serde(with = "humantime_serde")]
    pub state_retention: std::time::Duration,
    pub berth_max_sog: f64,
    pub destination_aliases: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap()
            .parse()
            .expect("failed to parse APP_ENVIRONMENT");

        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_ref().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("HARBORWATCH_ENGINE").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }
}

impl DetectionSettings {
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            confirmation_reports: self.confirmation_reports,
            min_dwell: Duration::from_std(self.min_dwell).unwrap(),
            max_open_call_age: Duration::from_std(self.max_open_call_age).unwrap(),
            berth_max_sog: self.berth_max_sog,
        }
    }

    pub fn destination_filter(&self) -> DestinationFilter {
        DestinationFilter::new(self.destination_aliases.iter().cloned())
    }

    pub fn state_retention(&self) -> Duration {
        Duration::from_std(self.state_retention).unwrap()
    }
}
