//! tasks テーブルの 1 行と Task の相互変換

use rusqlite::Row;
use todo_core::domain::timestamp;
use todo_core::domain::{DueDate, Priority, Task, TaskId, TaskStatus};

/// 全列を読む SELECT の列リスト（`TaskRow::read` と順序を合わせる）
pub(crate) const COLUMNS: &str =
    "id, title, notes, status, due_date, priority, tags, created_at, updated_at";

/// 列をそのまま持つ。解釈は `into_task` で行い、失敗は行単位の破損として扱う
#[derive(Debug)]
pub(crate) struct TaskRow {
    pub id: String,
    title: String,
    notes: Option<String>,
    status: String,
    due_date: Option<String>,
    priority: i64,
    tags: String,
    created_at: String,
    updated_at: String,
}

impl TaskRow {
    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            notes: row.get(2)?,
            status: row.get(3)?,
            due_date: row.get(4)?,
            priority: row.get(5)?,
            tags: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    /// 壊れていれば理由を返す
    pub fn into_task(self) -> Result<Task, String> {
        let id: TaskId = self.id.parse().map_err(|e| format!("{e}"))?;
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        let status: TaskStatus = self.status.parse().map_err(|e| format!("{e}"))?;
        let priority = u8::try_from(self.priority)
            .map_err(|_| format!("priority {} out of range", self.priority))
            .and_then(|p| Priority::new(p).map_err(|e| e.to_string()))?;
        let tags: Vec<String> =
            serde_json::from_str(&self.tags).map_err(|e| format!("tags: {e}"))?;
        let created_at = timestamp::parse(&self.created_at).map_err(|e| format!("created_at: {e}"))?;
        let updated_at = timestamp::parse(&self.updated_at).map_err(|e| format!("updated_at: {e}"))?;

        Ok(Task {
            id,
            title: self.title,
            notes: self.notes,
            status,
            due_date: self.due_date.and_then(DueDate::from_stored),
            priority,
            tags,
            created_at,
            updated_at,
        })
    }
}

/// 書き込み用に文字列化した列
pub(crate) struct TaskColumns {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub status: &'static str,
    pub due_date: Option<String>,
    pub due_day: Option<String>,
    pub priority: i64,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskColumns {
    pub fn from_task(task: &Task) -> serde_json::Result<Self> {
        Ok(Self {
            id: task.id.to_string(),
            title: task.title.clone(),
            notes: task.notes.clone(),
            status: task.status.as_str(),
            due_date: task.due_date.as_ref().map(|due| due.as_str().to_string()),
            due_day: task.due().map(|day| day.format("%Y-%m-%d").to_string()),
            priority: i64::from(task.priority.value()),
            tags: serde_json::to_string(&task.tags)?,
            created_at: timestamp::format(&task.created_at),
            updated_at: timestamp::format(&task.updated_at),
        })
    }
}
