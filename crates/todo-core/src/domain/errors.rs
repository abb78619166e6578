//! Errors - エラー型と分類
//!
//! # 分類
//! - Validation: 入力が不正（空タイトルなど）。永続化を試みる前に弾く
//! - NotFound: 対象 ID が存在しない。エラーではなく `Ok(None)` / no-op で表現する
//! - Storage: 永続化層の障害。リトライせず、そのまま呼び出し元へ返す

use thiserror::Error;

use super::ids::TaskId;

/// バックエンド固有のエラーを包むための型
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// ValidationError は入力の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("priority must be between 0 and 3, got {0}")]
    PriorityOutOfRange(u8),
}

/// StorageError は永続化層の障害
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {context}")]
    Unavailable {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to read {context}")]
    Read {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write {context}")]
    Write {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("record {id} is corrupt: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("record {0} already exists")]
    Duplicate(TaskId),
}

impl StorageError {
    pub fn unavailable(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unavailable {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn read(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Read {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn write(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Write {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn corrupt(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// ErrorKind は UI 側での見せ方を決めるための分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Storage,
}

/// TodoError は repository の操作が返すエラー
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::Storage(_) => ErrorKind::Storage,
        }
    }
}
