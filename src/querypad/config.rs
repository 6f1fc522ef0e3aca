use crate::error::{QuerypadError, Result};
use crate::query;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

fn default_width() -> usize {
    query::DEFAULT_WIDTH
}

/// Configuration for querypad, stored in config.json next to the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuerypadConfig {
    /// Target line width for the formatter
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for QuerypadConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

impl QuerypadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuerypadError::Io)?;
        let config: QuerypadConfig =
            serde_json::from_str(&content).map_err(QuerypadError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir).map_err(QuerypadError::Io)?;
        let content =
            serde_json::to_string_pretty(self).map_err(QuerypadError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(QuerypadError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuerypadConfig::load(dir.path()).unwrap();
        assert_eq!(config, QuerypadConfig::default());
        assert_eq!(config.width, 80);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuerypadConfig { width: 100 };
        config.save(dir.path()).unwrap();
        assert_eq!(QuerypadConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn unknown_width_field_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        let config = QuerypadConfig::load(dir.path()).unwrap();
        assert_eq!(config.width, 80);
    }
}
