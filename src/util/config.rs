use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::display::DisplayOptions;
use crate::locale::{CustomLocale, LocaleCatalog};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayOptions,
    #[serde(default)]
    pub locales: BTreeMap<String, CustomLocale>,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        // First existing file wins; none at all means built-in defaults.
        let home = std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config/agolabel/config.toml"));
        let platform = ProjectDirs::from("", "", "agolabel")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        match home.into_iter().chain(platform).find(|p| p.exists()) {
            Some(found) => Self::read(&found),
            None => Ok(AppConfig::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Built-in locale tables plus the ones declared under `[locales]`.
    pub fn catalog(&self) -> Result<LocaleCatalog> {
        LocaleCatalog::with_custom(&self.locales).context("Invalid locale table in config")
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.log.dir {
            return dir.clone();
        }
        if let Some(proj_dirs) = ProjectDirs::from("", "", "agolabel") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/agolabel/logs")
    }
}
