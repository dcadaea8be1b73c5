use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "plotify";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Record collection used when `--data` is not given
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Page size applied when a query does not specify one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Merge records sharing a scientific name before indexing
    #[serde(default)]
    pub dedupe_on_load: bool,
}

fn default_limit() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            default_limit: default_limit(),
            dedupe_on_load: false,
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    Ok(base.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.data_path, None);
        assert_eq!(config.default_limit, 20);
        assert!(!config.dedupe_on_load);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"data_path": "/srv/plants.json"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.data_path, Some(PathBuf::from("/srv/plants.json")));
        assert_eq!(config.default_limit, 20);
        assert!(!config.dedupe_on_load);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig {
            data_path: Some(PathBuf::from("plants.json")),
            default_limit: 50,
            dedupe_on_load: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_path_is_under_app_dir() {
        if let (Ok(dir), Ok(path)) = (get_app_data_dir(), get_config_path()) {
            assert_eq!(path, dir.join(CONFIG_FILE));
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
