//! Persistent CLI configuration.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snippetvault_core::query::SortOrder;
use snippetvault_core::StoreConfig;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const DB_FILE_NAME: &str = "snippetvault.db";
const DB_PATH_ENV: &str = "SNIPPETVAULT_DB_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub default_sort: SortOrder,
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            db_path: None,
            default_sort: SortOrder::default(),
            seed_samples: default_seed_samples(),
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

const fn default_seed_samples() -> bool {
    true
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join("snippetvault")
        .join(CONFIG_FILE_NAME)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("snippetvault")
        .join(DB_FILE_NAME)
}

impl CliConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let payload = serde_json::to_string_pretty(self)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, payload)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Database path from the flag, then `SNIPPETVAULT_DB_PATH`, then the config file.
    pub fn resolve_db_path(&self, cli_db_path: Option<PathBuf>) -> PathBuf {
        cli_db_path
            .or_else(|| env::var_os(DB_PATH_ENV).map(PathBuf::from))
            .or_else(|| self.db_path.clone())
            .unwrap_or_else(default_db_path)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            seed_samples: self.seed_samples,
            ..StoreConfig::default()
        }
    }
}
