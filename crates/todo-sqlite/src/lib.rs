//! todo-sqlite
//!
//! SQLite による `TaskStore` の永続化実装。
//!
//! ```ignore
//! let config = AppConfig::load(&config_path)?;
//! let store = SqliteTaskStore::open(config.database_path())?;
//! let repo = TaskRepository::with_system_clock(store);
//! ```

mod row;
mod schema;
mod store;

pub use self::store::SqliteTaskStore;
