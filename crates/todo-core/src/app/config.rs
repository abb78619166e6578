//! AppConfig - 保存先と入力まわりの設定

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const APP_DIR: &str = "todo-list";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
}

fn default_database_file() -> String {
    "tasks.db".to_string()
}

fn default_preferences_file() -> String {
    "preferences.json".to_string()
}

fn default_search_debounce_ms() -> u64 {
    200
}

/// ファイルに無いフィールドはデフォルト値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_database_file")]
    pub database_file: String,
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
            preferences_file: default_preferences_file(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl AppConfig {
    /// ファイルが無ければデフォルト。壊れた JSON はエラー
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(&self.preferences_file)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = AppConfig::default().with_data_dir("/tmp/todo");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/todo/tasks.db"));
        assert_eq!(config.preferences_path(), PathBuf::from("/tmp/todo/preferences.json"));
        assert_eq!(config.search_debounce(), Duration::from_millis(200));
        assert!(AppConfig::default().data_dir.ends_with("todo-list"));
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_dir":"/srv/todo","search_debounce_ms":50}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/todo"));
        assert_eq!(config.database_file, "tasks.db");
        assert_eq!(config.search_debounce(), Duration::from_millis(50));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
