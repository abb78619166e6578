//! TaskRepository - タスク操作の入口
//!
//! # 責務
//! - 入力の検証とデフォルト値（永続化の前に弾く）
//! - ID 採番・タイムスタンプ付与
//! - TaskStore への write-through（await し終えたら確定）
//!
//! # NotFound の扱い
//! - get / update / toggle_status: `Ok(None)`
//! - delete: 何もしない（冪等）

use chrono::NaiveDate;

use crate::domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus, TodoError};
use crate::ports::{Clock, IdGenerator, IndexScan, SystemClock, TaskStore, UlidGenerator};
use crate::query;

/// `list` の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// status の完全一致（status インデックスを使う）
    pub status: Option<TaskStatus>,
    /// タグの完全一致
    pub tag: Option<String>,
    /// title / notes / tags の部分一致（大文字小文字を区別しない）
    pub search: Option<String>,
}

impl ListFilter {
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    fn index(&self) -> IndexScan {
        self.status.map_or(IndexScan::All, IndexScan::Status)
    }

    fn narrow(&self, tasks: Vec<Task>) -> Vec<Task> {
        let tasks = match self.tag.as_deref() {
            Some(tag) => query::filter_by_tag(&tasks, Some(tag)),
            None => tasks,
        };
        match self.search.as_deref() {
            Some(text) => query::search(&tasks, text),
            None => tasks,
        }
    }
}

/// TaskRepository は TaskStore / Clock / IdGenerator を組み合わせる
///
/// # 使用例
/// ```ignore
/// let repo = TaskRepository::with_system_clock(InMemoryTaskStore::new());
/// let task = repo.add(NewTask::new("Buy milk")).await?;
/// let done = repo.toggle_status(task.id).await?;
/// ```
pub struct TaskRepository<S, C, G> {
    store: S,
    clock: C,
    ids: G,
}

impl<S: TaskStore> TaskRepository<S, SystemClock, UlidGenerator<SystemClock>> {
    /// 本番用: OS の時計と ULID 採番
    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, SystemClock, UlidGenerator::new(SystemClock))
    }
}

impl<S, C, G> TaskRepository<S, C, G>
where
    S: TaskStore,
    C: Clock,
    G: IdGenerator,
{
    pub fn new(store: S, clock: C, ids: G) -> Self {
        Self { store, clock, ids }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// ローカルタイムでの今日（パイプラインに渡す）
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// 新しいタスクを作成して保存
    ///
    /// # Errors
    /// - title が空白のみなら `ValidationError::EmptyTitle`（保存は試みない）
    /// - 保存に失敗したら `StorageError`
    pub async fn add(&self, input: NewTask) -> Result<Task, TodoError> {
        let id = self.ids.generate_task_id();
        let task = Task::create(id, input, self.clock.now())?;
        self.store.insert(task.clone()).await?;
        log::info!("added task {} ({:?})", task.id, task.title);
        Ok(task)
    }

    pub async fn get(&self, id: TaskId) -> Result<Option<Task>, TodoError> {
        Ok(self.store.get(id).await?)
    }

    /// patch をマージして updated_at を進める
    ///
    /// id / created_at は TaskPatch に含まれないので変わらない。
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Option<Task>, TodoError> {
        let Some(mut task) = self.store.get(id).await? else {
            log::debug!("update skipped, task {id} not found");
            return Ok(None);
        };
        task.apply(patch)?;
        task.touch(self.clock.now());
        self.store.put(task.clone()).await?;
        log::info!("updated task {}", task.id);
        Ok(Some(task))
    }

    /// open ⇄ completed
    pub async fn toggle_status(&self, id: TaskId) -> Result<Option<Task>, TodoError> {
        let Some(task) = self.store.get(id).await? else {
            log::debug!("toggle skipped, task {id} not found");
            return Ok(None);
        };
        let status = task.status.toggled();
        let updated = self.update(id, TaskPatch::new().status(status)).await?;
        if updated.is_some() {
            log::info!("task {id} is now {status}");
        }
        Ok(updated)
    }

    /// 冪等: 存在しない id の削除は no-op
    pub async fn delete(&self, id: TaskId) -> Result<(), TodoError> {
        if self.store.remove(id).await? {
            log::info!("deleted task {id}");
        } else {
            log::debug!("delete of missing task {id} ignored");
        }
        Ok(())
    }

    /// updated_at 降順の一覧。filter があれば絞り込む
    pub async fn list(&self, filter: Option<&ListFilter>) -> Result<Vec<Task>, TodoError> {
        let index = filter.map_or(IndexScan::All, ListFilter::index);
        let tasks = self.store.scan(index).await?;
        let tasks = match filter {
            Some(filter) => filter.narrow(tasks),
            None => tasks,
        };
        log::debug!("listed {} tasks via {:?}", tasks.len(), index);
        Ok(tasks)
    }

    /// due date インデックスでの範囲走査（両端含む）
    pub async fn list_due_between(
        &self,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Task>, TodoError> {
        Ok(self.store.scan(IndexScan::DueBetween { from, until }).await?)
    }

    /// TaskBoard の初期化用に全件を読む
    pub async fn load_all(&self) -> Result<Vec<Task>, TodoError> {
        self.list(None).await
    }
}
