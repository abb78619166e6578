//! State - タスクの状態
//!
//! 状態は `open` と `completed` の 2 つだけ。完了しても due_date は消さない。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TaskStatus はタスクの状態を表現
///
/// # 状態遷移
/// - open -> completed（toggle）
/// - completed -> open（toggle）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Completed => "completed",
        }
    }

    /// open ⇄ completed
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Open => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Open,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, TaskStatus::Open)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0:?}")]
pub struct ParseStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_open() {
        assert_eq!(TaskStatus::default(), TaskStatus::Open);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        assert_eq!(TaskStatus::Open.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Open.toggled().toggled(), TaskStatus::Open);
    }

    #[rstest]
    #[case::open(TaskStatus::Open, "open")]
    #[case::completed(TaskStatus::Completed, "completed")]
    fn text_form_matches_serde(#[case] status: TaskStatus, #[case] text: &str) {
        assert_eq!(status.to_string(), text);
        assert_eq!(text.parse::<TaskStatus>().unwrap(), status);
        assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{text}\""));
    }

    #[test]
    fn unknown_text_is_rejected() {
        assert!("done".parse::<TaskStatus>().is_err());
    }
}
