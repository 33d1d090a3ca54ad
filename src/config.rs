use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::presets::Preset;
use crate::session::SessionConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub preset: String,
    pub success_delay_ms: u64,
    pub retry_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let pacing = SessionConfig::default();
        Self {
            preset: Preset::default().to_string(),
            success_delay_ms: pacing.success_delay.as_millis() as u64,
            retry_delay_ms: pacing.retry_delay.as_millis() as u64,
        }
    }
}

impl Config {
    /// Unknown names fall back to the default list
    pub fn preset(&self) -> Preset {
        Preset::from_name(&self.preset).unwrap_or_default()
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            success_delay: Duration::from_millis(cfg.success_delay_ms),
            retry_delay: Duration::from_millis(cfg.retry_delay_ms),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            preset: "animals".into(),
            success_delay_ms: 800,
            retry_delay_ms: 300,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
        assert_eq!(loaded.preset(), Preset::Animals);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"preset": "colors"}"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.preset(), Preset::Colors);
        assert_eq!(loaded.success_delay_ms, 1500);
        assert_eq!(loaded.retry_delay_ms, 1000);
    }

    #[test]
    fn missing_or_corrupt_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());

        fs::write(&path, b"][").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn unknown_preset_falls_back() {
        let cfg = Config {
            preset: "dinosaurs".into(),
            ..Default::default()
        };
        assert_eq!(cfg.preset(), Preset::Safari);
    }

    #[test]
    fn session_pacing_from_config() {
        let cfg = Config {
            success_delay_ms: 20,
            retry_delay_ms: 10,
            ..Default::default()
        };
        let pacing = SessionConfig::from(&cfg);
        assert_eq!(pacing.success_delay, Duration::from_millis(20));
        assert_eq!(pacing.retry_delay, Duration::from_millis(10));
    }
}
