use std::{fs, sync::Arc};

use parking_lot::RwLock;
use profilarr_lib::{Result, fs::config_dir};
use serde::{Deserialize, Serialize};

pub use theme::Theme;

mod theme;

const FILE_NAME: &str = "gui.toml";

/// Handle to the GUI's configuration
pub type Cfg = Arc<RwLock<GuiConfig>>;

/// Settings that only concern the desktop front end, serialized to TOML.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub theme: Theme,
}

impl GuiConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(FILE_NAME);

        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_default())
        } else {
            let cfg = Self::default();
            cfg.save()?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        fs::write(config_dir()?.join(FILE_NAME), contents)?;

        Ok(())
    }

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }
}
