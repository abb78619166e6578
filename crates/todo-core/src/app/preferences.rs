//! Preferences - 画面のフィルタ状態の保存と復元
//!
//! JSON ファイル 1 つに view / selectedTag / query / sortBy を持つ。
//! 読めない値はフィールド単位でデフォルトに戻す（ファイル全体は捨てない）。

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::{SortKey, View};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_tag: Option<String>,
    pub query: String,
    pub sort_by: SortKey,
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Every field as an untyped value, so one bad field does not poison the rest.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPreferences {
    view: Option<Value>,
    selected_tag: Option<Value>,
    query: Option<Value>,
    sort_by: Option<Value>,
}

impl From<RawPreferences> for Preferences {
    fn from(raw: RawPreferences) -> Self {
        Self {
            view: raw.view.and_then(|v| serde_json::from_value(v).ok()).unwrap_or_default(),
            selected_tag: raw
                .selected_tag
                .and_then(|v| v.as_str().map(str::to_string))
                .filter(|tag| !tag.is_empty()),
            query: raw
                .query
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            sort_by: raw.sort_by.and_then(|v| serde_json::from_value(v).ok()).unwrap_or_default(),
        }
    }
}

impl Preferences {
    /// JSON テキストから復元。壊れていればデフォルト
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<RawPreferences>(text) {
            Ok(raw) => raw.into(),
            Err(e) => {
                log::warn!("ignoring unreadable preferences: {e}");
                Self::default()
            }
        }
    }

    /// ファイルが無ければデフォルト。失敗しない
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("failed to read preferences from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// 一時ファイルに書いてから rename する
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let json = serde_json::to_string_pretty(self)?;
        let write_err = |source| PreferencesError::Write { path: path.to_path_buf(), source };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(write_err)?;
        log::debug!("saved preferences to {}", path.display());
        Ok(())
    }
}
