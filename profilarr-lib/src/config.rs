use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, fs::config_dir};

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "client.toml";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Connection settings shared by every front end, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub version: u16,
    /// Root of the backend's JSON API
    pub backend_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            backend_url: DEFAULT_BACKEND_URL.into(),
        }
    }
}

impl ClientConfig {
    /// Load the configuration from the user's config directory, writing the defaults out on
    /// first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(FILE_NAME))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?.join(FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            debug!("No configuration at {}, writing defaults", path.display());
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }
}
