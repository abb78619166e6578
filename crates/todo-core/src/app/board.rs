//! TaskBoard - 呼び出し側が持つタスク一覧と現在のクエリ
//!
//! # 役割
//! - 永続化された一覧の写しを保持する（正本は TaskStore）
//! - repository の戻り値を `upsert` / `remove` でマージする
//! - 表示用の一覧は `visible(today)` で query パイプラインから導出する
//!
//! 表示結果は (tasks, query, today) が変わらない限りキャッシュを返す。

use chrono::NaiveDate;

use super::preferences::Preferences;
use crate::domain::{Task, TaskId};
use crate::query::{self, Query, SortKey, View};

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    query: Query,
    cache: Option<(NaiveDate, Vec<Task>)>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `load_all` の結果から作る（updated_at 降順のまま保持）
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, ..Self::default() }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// id が既にあれば置き換え、なければ先頭に追加
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.insert(0, task),
        }
        self.invalidate();
    }

    /// 存在しない id は何もしない
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.invalidate();
        }
        removed
    }

    pub fn set_view(&mut self, view: View) {
        self.update_query(|query| query.view = view);
    }

    /// `None` でタグ絞り込みを解除
    pub fn select_tag(&mut self, tag: Option<String>) {
        self.update_query(|query| query.tag = tag.filter(|tag| !tag.is_empty()));
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update_query(|query| query.text = text);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.update_query(|query| query.sort = sort);
    }

    /// view / tag / search を初期状態に戻す。並び順はそのまま
    pub fn clear_filters(&mut self) {
        self.update_query(|query| {
            query.view = View::All;
            query.tag = None;
            query.text.clear();
        });
    }

    /// 現在のクエリを適用した表示用一覧
    pub fn visible(&mut self, today: NaiveDate) -> &[Task] {
        let stale = !matches!(&self.cache, Some((day, _)) if *day == today);
        if stale {
            let tasks = self.query.run(&self.tasks, today);
            log::debug!(
                "recomputed board: {} of {} tasks visible ({} / {})",
                tasks.len(),
                self.tasks.len(),
                self.query.view,
                self.query.sort
            );
            self.cache = Some((today, tasks));
        }
        match &self.cache {
            Some((_, tasks)) => tasks,
            None => &[],
        }
    }

    pub fn open_count(&self) -> usize {
        query::open_count(&self.tasks)
    }

    pub fn all_tags(&self) -> Vec<String> {
        query::all_tags(&self.tasks)
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            view: self.query.view,
            selected_tag: self.query.tag.clone(),
            query: self.query.text.clone(),
            sort_by: self.query.sort,
        }
    }

    pub fn apply_preferences(&mut self, prefs: Preferences) {
        self.update_query(|query| {
            *query = Query {
                view: prefs.view,
                tag: prefs.selected_tag.filter(|tag| !tag.is_empty()),
                text: prefs.query,
                sort: prefs.sort_by,
            }
        });
    }

    fn update_query(&mut self, f: impl FnOnce(&mut Query)) {
        let before = self.query.clone();
        f(&mut self.query);
        if self.query != before {
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }
}
