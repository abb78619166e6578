//! TaskStore port - タスクレコードの正本（source of truth）
//!
//! TaskStore は以下を管理します：
//! - 主キー（TaskId）によるレコードの保存・取得・削除
//! - 二次インデックス（status, due date, updated_at）による走査
//!
//! バリデーション・デフォルト値・タイムスタンプ更新は `app::repository` の責務で、
//! ここは「キー付きテーブル」以上のことはしない。
//!
//! # 実装
//! - `impls::InMemoryTaskStore`（開発・テスト用）
//! - `todo-sqlite` クレートの `SqliteTaskStore`（永続化用）

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{StorageError, Task, TaskId, TaskStatus};

/// 走査に使うインデックス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexScan {
    /// 全件
    #[default]
    All,
    /// status の完全一致
    Status(TaskStatus),
    /// due date が `from..=until` に入るもの（片側省略可）。
    /// due date が無い・解釈できないレコードは含まない。
    DueBetween {
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    },
}

impl IndexScan {
    /// 範囲が空（from > until）なら true
    pub fn is_empty_range(&self) -> bool {
        matches!(
            self,
            IndexScan::DueBetween { from: Some(from), until: Some(until) } if from > until
        )
    }
}

/// TaskStore は Task レコードのキー付きテーブル
///
/// # 設計原則
/// - 書き込みは呼び出し元が await し終えた時点で確定（write-through）
/// - 失敗は `StorageError` としてそのまま返す（リトライしない）
/// - `scan` は常に updated_at 降順（同時刻は id 降順）で返す
///
/// # 既知の制限
/// 同じ id への並行更新は調停しない（last write wins、バージョン検出なし）。
/// 単一ユーザー・単一ウィンドウ前提での割り切り。
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 新規レコードを保存。同じ id が既にあれば `StorageError::Duplicate`
    async fn insert(&self, task: Task) -> Result<(), StorageError>;

    /// 存在しなければ `Ok(None)`
    async fn get(&self, id: TaskId) -> Result<Option<Task>, StorageError>;

    /// レコード全体を upsert
    async fn put(&self, task: Task) -> Result<(), StorageError>;

    /// 削除したら true、元々無ければ false
    async fn remove(&self, id: TaskId) -> Result<bool, StorageError>;

    async fn scan(&self, index: IndexScan) -> Result<Vec<Task>, StorageError>;
}

/// scan の基本順序: updated_at 降順、同時刻は id 降順
pub fn recent_first(a: &Task, b: &Task) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| b.id.cmp(&a.id))
}
