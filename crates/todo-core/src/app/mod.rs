//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **TaskRepository**: 検証・採番・タイムスタンプ付与と TaskStore への write-through
//! - **TaskBoard**: 呼び出し側のタスク一覧と現在のクエリ
//! - **Preferences**: フィルタ状態の保存と復元
//! - **Debouncer**: 検索入力の確定待ち
//! - **AppConfig**: 保存先と待ち時間の設定

pub mod board;
pub mod config;
pub mod debounce;
pub mod preferences;
pub mod repository;

// 主要な型を再エクスポート
pub use self::board::TaskBoard;
pub use self::config::{AppConfig, ConfigError};
pub use self::debounce::Debouncer;
pub use self::preferences::{Preferences, PreferencesError};
pub use self::repository::{ListFilter, TaskRepository};
