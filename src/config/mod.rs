//! Application configuration loaded from TOML.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{mount_element_id, AppConfig, AppSection, LoggingSection, StoreSection};
