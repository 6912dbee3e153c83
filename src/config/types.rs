use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Application root settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSection {
    /// Host element the root component is attached to (e.g. "#app").
    #[serde(default = "default_mount_point")]
    pub mount_point: String,
}

/// State container settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Report mutations that leave state unchanged.
    #[serde(default)]
    pub strict: bool,
    /// Log every committed mutation.
    #[serde(default)]
    pub log_mutations: bool,
}

/// Logging settings. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// One of "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Element id named by a mount point: `"#app"` and `"app"` both give
/// `"app"`. Empty ids and ids containing `#` or whitespace are rejected.
pub fn mount_element_id(mount_point: &str) -> Option<&str> {
    let id = mount_point.strip_prefix('#').unwrap_or(mount_point);
    if id.is_empty() || id.contains('#') || id.chars().any(char::is_whitespace) {
        return None;
    }
    Some(id)
}

fn default_mount_point() -> String {
    "#app".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            mount_point: default_mount_point(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
