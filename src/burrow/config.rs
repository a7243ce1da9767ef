use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_THEME: &str = "dark";

/// Which front door `burrow` opens when run with no subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    Tui,
    Cli,
}

/// User configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BurrowConfig {
    /// Editor command used when `$EDITOR`/`$VISUAL` are unset.
    #[serde(default)]
    pub editor: Option<String>,

    /// Default mode for a bare `burrow` invocation.
    #[serde(rename = "defaultMode", default)]
    pub default_mode: UiMode,

    /// Named color theme for the interactive UI.
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for BurrowConfig {
    fn default() -> Self {
        Self {
            editor: None,
            default_mode: UiMode::Tui,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl BurrowConfig {
    /// Load config from the given directory. A missing or unreadable file
    /// silently yields defaults; configuration is never a reason to fail.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Self {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Self::default();
        }
        fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}
