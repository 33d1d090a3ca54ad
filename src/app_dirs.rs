use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "safari";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("safari_config.json"))
    }

    pub fn custom_words_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("custom_words.json"))
            .unwrap_or_else(|| PathBuf::from("safari_custom_words.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("safari.log")
        } else {
            Self::project()
                .map(|pd| pd.data_local_dir().join("safari.log"))
                .unwrap_or_else(|| PathBuf::from("safari.log"))
        }
    }
}
