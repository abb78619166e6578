//! テーブル定義とマイグレーション

use rusqlite::Connection;

/// `PRAGMA user_version` に記録するスキーマ版
pub(crate) const SCHEMA_VERSION: i64 = 1;

/// `due_day` は due_date を解釈できたときだけ `YYYY-MM-DD`、それ以外は NULL。
/// 範囲走査はこの列のインデックスを使う。
const CREATE_V1: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
  id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  notes TEXT,
  status TEXT NOT NULL,
  due_date TEXT,
  due_day TEXT,
  priority INTEGER NOT NULL,
  tags TEXT NOT NULL,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
CREATE INDEX IF NOT EXISTS idx_tasks_due_day ON tasks(due_day);
CREATE INDEX IF NOT EXISTS idx_tasks_updated_at ON tasks(updated_at);
"#;

pub(crate) fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }
    conn.execute_batch(CREATE_V1)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    log::info!("migrated task database from v{version} to v{SCHEMA_VERSION}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        let indexes: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = 'tasks' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indexes, 3);
    }
}
