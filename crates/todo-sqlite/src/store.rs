//! SqliteTaskStore - ファイルに永続化する TaskStore
//!
//! # 実装詳細
//! - rusqlite の同期 Connection を `std::sync::Mutex` で包む
//! - 各呼び出しは `spawn_blocking` 上で実行し、async ランタイムを塞がない
//! - 書き込みは 1 文ずつ autocommit（戻った時点でディスクに確定）
//!
//! # 破損レコード
//! - `get`: `StorageError::Corrupt` を返す
//! - `scan`: warn ログを出して読み飛ばす（他のレコードは読める）

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use todo_core::domain::{StorageError, Task, TaskId};
use todo_core::ports::{IndexScan, TaskStore};

use crate::row::{COLUMNS, TaskColumns, TaskRow};
use crate::schema;

const ORDER: &str = "ORDER BY updated_at DESC, id DESC";

#[derive(Clone)]
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteTaskStore {
    /// ファイルを開く（無ければ作る）。親ディレクトリも作成する
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| StorageError::unavailable(format!("create {}", dir.display()), e))?;
        }
        let conn = Connection::open(&path)
            .map_err(|e| StorageError::unavailable(format!("open {}", path.display()), e))?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            "#,
        )
        .map_err(|e| StorageError::unavailable("configure database", e))?;
        schema::migrate(&conn).map_err(|e| StorageError::unavailable("migrate schema", e))?;
        log::info!("opened task database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path),
        })
    }

    /// テスト用。プロセス終了で消える
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::unavailable("open in-memory database", e))?;
        schema::migrate(&conn).map_err(|e| StorageError::unavailable("migrate schema", e))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn with_conn<T, F>(&self, op: &'static str, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StorageError::unavailable(op, "connection lock poisoned"))?;
            f(&guard)
        })
        .await
        .map_err(|e| StorageError::unavailable(op, e))?
    }
}

fn fetch(conn: &Connection, where_clause: &str, params: impl rusqlite::Params) -> Result<Vec<Task>, StorageError> {
    let sql = format!("SELECT {COLUMNS} FROM tasks {where_clause} {ORDER}");
    let mut stmt = conn.prepare(&sql).map_err(|e| StorageError::read("tasks", e))?;
    let rows = stmt
        .query_map(params, TaskRow::read)
        .map_err(|e| StorageError::read("tasks", e))?;

    let mut tasks = Vec::new();
    for row in rows {
        let row = row.map_err(|e| StorageError::read("tasks", e))?;
        let id = row.id.clone();
        match row.into_task() {
            Ok(task) => tasks.push(task),
            Err(reason) => log::warn!("skipping corrupt task {id}: {reason}"),
        }
    }
    Ok(tasks)
}

fn upsert(conn: &Connection, task: &Task, replace: bool) -> Result<(), StorageError> {
    let cols = TaskColumns::from_task(task).map_err(|e| StorageError::write(task.id.to_string(), e))?;
    let conflict = if replace {
        "ON CONFLICT(id) DO UPDATE SET
           title = excluded.title,
           notes = excluded.notes,
           status = excluded.status,
           due_date = excluded.due_date,
           due_day = excluded.due_day,
           priority = excluded.priority,
           tags = excluded.tags,
           created_at = excluded.created_at,
           updated_at = excluded.updated_at"
    } else {
        ""
    };
    let sql = format!(
        "INSERT INTO tasks (id, title, notes, status, due_date, due_day, priority, tags, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) {conflict}"
    );
    conn.execute(
        &sql,
        params![
            cols.id,
            cols.title,
            cols.notes,
            cols.status,
            cols.due_date,
            cols.due_day,
            cols.priority,
            cols.tags,
            cols.created_at,
            cols.updated_at,
        ],
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) if !replace => StorageError::Duplicate(task.id),
        _ => StorageError::write(task.id.to_string(), e),
    })?;
    Ok(())
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, task: Task) -> Result<(), StorageError> {
        self.with_conn("insert", move |conn| upsert(conn, &task, false)).await
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StorageError> {
        self.with_conn("get", move |conn| {
            let sql = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1");
            let row = conn
                .query_row(&sql, params![id.to_string()], TaskRow::read)
                .optional()
                .map_err(|e| StorageError::read(id.to_string(), e))?;
            row.map(|row| row.into_task().map_err(|reason| StorageError::corrupt(id.to_string(), reason)))
                .transpose()
        })
        .await
    }

    async fn put(&self, task: Task) -> Result<(), StorageError> {
        self.with_conn("put", move |conn| upsert(conn, &task, true)).await
    }

    async fn remove(&self, id: TaskId) -> Result<bool, StorageError> {
        self.with_conn("remove", move |conn| {
            let changed = conn
                .execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])
                .map_err(|e| StorageError::write(id.to_string(), e))?;
            Ok(changed > 0)
        })
        .await
    }

    async fn scan(&self, index: IndexScan) -> Result<Vec<Task>, StorageError> {
        if index.is_empty_range() {
            return Ok(Vec::new());
        }
        self.with_conn("scan", move |conn| match index {
            IndexScan::All => fetch(conn, "", []),
            IndexScan::Status(status) => fetch(conn, "WHERE status = ?1", params![status.as_str()]),
            IndexScan::DueBetween { from, until } => {
                let day = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());
                fetch(
                    conn,
                    "WHERE due_day IS NOT NULL
                       AND (?1 IS NULL OR due_day >= ?1)
                       AND (?2 IS NULL OR due_day <= ?2)",
                    params![day(from), day(until)],
                )
            }
        })
        .await
    }
}
