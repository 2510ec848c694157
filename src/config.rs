use crate::error::{Result, TaskboardError};
use crate::table::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings for a [`BoardStore`](crate::store::BoardStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the board collection is stored under
    pub storage_key: String,
    /// Name of the column synthesized for new or emptied boards
    pub default_column: String,
    /// Stamped as `createdBy` on new tasks
    pub author: String,
    pub page_size: usize,
    /// Horizon for "due soon", in days
    pub due_soon_days: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "boards".to_string(),
            default_column: "To Do".to_string(),
            author: "me".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            due_soon_days: 7,
        }
    }
}

impl StoreConfig {
    pub const FILE_NAME: &'static str = "config.toml";
    const ENV_PREFIX: &'static str = "TASKBOARD_";

    /// Parses TOML; absent keys keep their defaults
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| TaskboardError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, then applies `TASKBOARD_*` overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            debug!(path = %path.display(), "loading store config");
            Self::from_toml(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from a variable lookup, normally the environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", Self::ENV_PREFIX, name));

        if let Some(v) = var("STORAGE_KEY") {
            self.storage_key = v;
        }
        if let Some(v) = var("DEFAULT_COLUMN") {
            self.default_column = v;
        }
        if let Some(v) = var("AUTHOR") {
            self.author = v;
        }
        if let Some(v) = var("PAGE_SIZE") {
            self.page_size = v.parse().map_err(|_| {
                TaskboardError::ConfigError(format!("TASKBOARD_PAGE_SIZE is not a number: {v}"))
            })?;
        }
        if let Some(v) = var("DUE_SOON_DAYS") {
            self.due_soon_days = v.parse().map_err(|_| {
                TaskboardError::ConfigError(format!("TASKBOARD_DUE_SOON_DAYS is not a number: {v}"))
            })?;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(TaskboardError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.default_column.trim().is_empty() {
            return Err(TaskboardError::ConfigError(
                "default_column must not be empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(TaskboardError::ConfigError(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.due_soon_days < 0 {
            return Err(TaskboardError::ConfigError(
                "due_soon_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
