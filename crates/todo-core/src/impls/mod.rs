//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: 開発・テスト用の正本
//!
//! # 永続化用実装
//! 永続化用の実装は別クレートに配置します：
//! - `todo-sqlite`: SqliteTaskStore

pub mod inmem_store;

pub use self::inmem_store::InMemoryTaskStore;
