pub mod app_config;
pub mod config;
pub mod vehicle;

pub use app_config::{AppConfig, Pacing};
pub use config::{load_app_config, load_app_config_from_env, parse_base_url, parse_listing_urls};
pub use vehicle::{Condition, Numeric, VehicleRecord, CSV_COLUMNS, IMAGE_SEPARATOR};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
