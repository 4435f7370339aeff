//! Shared inputs and configuration for the content-brief research pipeline.

pub mod app_config;
pub mod competitors;
pub mod config;
pub mod error;
pub mod intent;

pub use app_config::AppConfig;
pub use competitors::{load_competitors, CompetitorDocument, CompetitorEntry, CompetitorsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use intent::Intent;
