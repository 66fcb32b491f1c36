use crate::error::{Result, StashError};
use crate::model::{Language, Visibility};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_OWNER: &str = "local";

/// Configuration for snipstash, stored as config.json next to the vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StashConfig {
    /// Identity recorded as snippet owner and version author.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Language assumed when `add` is called without `--lang`.
    #[serde(default)]
    pub default_language: Language,

    /// Visibility assigned to new snippets.
    #[serde(default)]
    pub default_visibility: Visibility,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            default_language: Language::default(),
            default_visibility: Visibility::default(),
        }
    }
}

impl StashConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StashError::Io)?;
        let config: StashConfig =
            serde_json::from_str(&content).map_err(StashError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StashError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StashError::Serialization)?;
        fs::write(config_path, content).map_err(StashError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StashConfig::default();
        assert_eq!(config.owner, "local");
        assert_eq!(config.default_language, Language::Text);
        assert_eq!(config.default_visibility, Visibility::Private);
    }

    #[test]
    fn load_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StashConfig::load(dir.path()).unwrap();
        assert_eq!(config, StashConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let config = StashConfig {
            owner: "carol".to_string(),
            default_language: Language::Rust,
            default_visibility: Visibility::Team,
        };
        config.save(dir.path()).unwrap();

        let loaded = StashConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_config_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{ "owner": "dana" }"#,
        )
        .unwrap();

        let loaded = StashConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.owner, "dana");
        assert_eq!(loaded.default_language, Language::Text);
    }
}
