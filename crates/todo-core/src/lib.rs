//! todo-core
//!
//! Core building blocks for a local task list.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, state, priority, due, tags, timestamp, errors）
//! - **ports**: 抽象化レイヤー（TaskStore, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryTaskStore など開発・テスト用）
//! - **query**: 純粋なフィルタ・検索・ソートのパイプライン
//! - **app**: アプリケーションロジック（repository, board, preferences, debounce, config）
//!
//! SQLite による永続化は `todo-sqlite` クレートにある。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod query;
