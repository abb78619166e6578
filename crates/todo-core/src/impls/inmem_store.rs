//! InMemoryTaskStore - 開発・テスト用の正本
//!
//! # 実装詳細
//! - HashMap<TaskId, Task> が主テーブル
//! - status / updated_at / due date の二次インデックスを別に持つ
//! - tokio の Mutex で排他制御（プロセス終了で消える）

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::domain::{StorageError, Task, TaskId, TaskStatus};
use crate::ports::{IndexScan, TaskStore, recent_first};

/// In-memory store state.
#[derive(Default)]
struct InMemoryStoreState {
    /// All task records (single source of truth).
    records: HashMap<TaskId, Task>,

    /// status -> ids
    by_status: HashMap<TaskStatus, BTreeSet<TaskId>>,

    /// (updated_at, id), iterated in reverse for "most recent first".
    by_updated: BTreeSet<(DateTime<Utc>, TaskId)>,

    /// parsed due date -> ids. Records without a parseable due date are not indexed.
    by_due: BTreeMap<NaiveDate, BTreeSet<TaskId>>,
}

impl InMemoryStoreState {
    fn index(&mut self, task: &Task) {
        self.by_status.entry(task.status).or_default().insert(task.id);
        self.by_updated.insert((task.updated_at, task.id));
        if let Some(due) = task.due() {
            self.by_due.entry(due).or_default().insert(task.id);
        }
    }

    fn unindex(&mut self, task: &Task) {
        if let Some(ids) = self.by_status.get_mut(&task.status) {
            ids.remove(&task.id);
        }
        self.by_updated.remove(&(task.updated_at, task.id));
        if let Some(due) = task.due()
            && let Some(ids) = self.by_due.get_mut(&due)
        {
            ids.remove(&task.id);
            if ids.is_empty() {
                self.by_due.remove(&due);
            }
        }
    }

    fn upsert(&mut self, task: Task) {
        if let Some(previous) = self.records.remove(&task.id) {
            self.unindex(&previous);
        }
        self.index(&task);
        self.records.insert(task.id, task);
    }

    fn collect<'a>(&self, ids: impl Iterator<Item = &'a TaskId>) -> Vec<Task> {
        let mut tasks: Vec<Task> = ids.filter_map(|id| self.records.get(id)).cloned().collect();
        tasks.sort_by(recent_first);
        tasks
    }

    fn scan(&self, index: IndexScan) -> Vec<Task> {
        if index.is_empty_range() {
            return Vec::new();
        }
        match index {
            IndexScan::All => self
                .by_updated
                .iter()
                .rev()
                .filter_map(|(_, id)| self.records.get(id))
                .cloned()
                .collect(),
            IndexScan::Status(status) => match self.by_status.get(&status) {
                Some(ids) => self.collect(ids.iter()),
                None => Vec::new(),
            },
            IndexScan::DueBetween { from, until } => {
                let lower = from.map_or(Bound::Unbounded, Bound::Included);
                let upper = until.map_or(Bound::Unbounded, Bound::Included);
                self.collect(self.by_due.range((lower, upper)).flat_map(|(_, ids)| ids.iter()))
            }
        }
    }
}

/// In-memory TaskStore implementation.
///
/// clone は同じテーブルを共有する。
#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<Mutex<InMemoryStoreState>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (e.g. a snapshot loaded elsewhere).
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut state = InMemoryStoreState::default();
        for task in tasks {
            state.upsert(task);
        }
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.records.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: Task) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        if state.records.contains_key(&task.id) {
            return Err(StorageError::Duplicate(task.id));
        }
        state.upsert(task);
        Ok(())
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StorageError> {
        let state = self.state.lock().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn put(&self, task: Task) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        state.upsert(task);
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> Result<bool, StorageError> {
        let mut state = self.state.lock().await;
        match state.records.remove(&id) {
            Some(task) => {
                state.unindex(&task);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn scan(&self, index: IndexScan) -> Result<Vec<Task>, StorageError> {
        let state = self.state.lock().await;
        Ok(state.scan(index))
    }
}
