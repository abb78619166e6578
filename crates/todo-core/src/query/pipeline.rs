//! Pipeline stages and the `Query` that chains them.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sort::{SortKey, sort_tasks};
use super::view::View;
use crate::domain::Task;

/// Current filter / sort state.
///
/// `run` is a pure function of `(tasks, self, today)`: the same inputs always
/// give the same output and nothing is mutated, so it is safe to call on
/// every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub view: View,
    pub tag: Option<String>,
    pub text: String,
    pub sort: SortKey,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// view -> tag -> search -> sort
    pub fn run(&self, tasks: &[Task], today: NaiveDate) -> Vec<Task> {
        let by_view = filter_by_view(tasks, self.view, today);
        let by_tag = filter_by_tag(&by_view, self.tag.as_deref());
        let found = search(&by_tag, &self.text);
        sort_tasks(&found, self.sort)
    }
}

pub fn filter_by_view(tasks: &[Task], view: View, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| view.admits(task, today))
        .cloned()
        .collect()
}

/// `None` or an empty tag is a no-op.
pub fn filter_by_tag(tasks: &[Task], tag: Option<&str>) -> Vec<Task> {
    match tag {
        Some(tag) if !tag.is_empty() => tasks.iter().filter(|task| task.has_tag(tag)).cloned().collect(),
        _ => tasks.to_vec(),
    }
}

/// Case-insensitive substring match over title, notes and tags.
/// Blank text is a no-op.
pub fn search(tasks: &[Task], text: &str) -> Vec<Task> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|task| task.matches_text(&needle))
        .cloned()
        .collect()
}

pub fn open_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.is_open()).count()
}

/// Distinct tags across `tasks`, sorted ascending.
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .flat_map(|task| task.tags.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, Priority, TaskId, TaskPatch, TaskStatus};
    use chrono::{TimeZone, Utc};
    use ulid::Ulid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    struct Seed<'a> {
        title: &'a str,
        notes: Option<&'a str>,
        due: Option<&'a str>,
        tags: &'a [&'a str],
        priority: u8,
        completed: bool,
    }

    impl<'a> Seed<'a> {
        fn new(title: &'a str) -> Self {
            Self { title, notes: None, due: None, tags: &[], priority: 1, completed: false }
        }
    }

    fn build(seeds: &[Seed<'_>]) -> Vec<Task> {
        seeds
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                let mut input = NewTask::new(seed.title)
                    .with_priority(Priority::new(seed.priority).unwrap())
                    .with_tags(seed.tags.iter().copied());
                if let Some(notes) = seed.notes {
                    input = input.with_notes(notes);
                }
                if let Some(due) = seed.due {
                    input = input.with_due_date(due);
                }
                let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, i as u32, 0).unwrap();
                let mut task = Task::create(TaskId::from_ulid(Ulid::new()), input, now).unwrap();
                if seed.completed {
                    task.apply(TaskPatch::new().status(TaskStatus::Completed)).unwrap();
                }
                task
            })
            .collect()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn fixture() -> Vec<Task> {
        build(&[
            Seed { tags: &["grocery"], due: Some("2024-05-10"), ..Seed::new("Buy milk") },
            Seed { tags: &["work"], completed: true, ..Seed::new("Ship report") },
            Seed { tags: &["work"], due: Some("2024-05-12"), priority: 3, ..Seed::new("Prepare demo") },
            Seed { notes: Some("call the Plumber"), ..Seed::new("Fix sink") },
            Seed { tags: &["home"], completed: true, ..Seed::new("Water plants") },
        ])
    }

    #[test]
    fn empty_input_is_empty_at_every_stage() {
        let query = Query::new().view(View::Today).tag("work").text("x").sort(SortKey::Due);
        assert!(query.run(&[], today()).is_empty());
        assert!(filter_by_view(&[], View::Upcoming, today()).is_empty());
        assert!(filter_by_tag(&[], Some("work")).is_empty());
        assert!(search(&[], "milk").is_empty());
    }

    #[test]
    fn default_query_lists_everything_most_recent_first() {
        let tasks = fixture();
        let out = Query::new().run(&tasks, today());
        assert_eq!(
            titles(&out),
            vec!["Water plants", "Fix sink", "Prepare demo", "Ship report", "Buy milk"]
        );
    }

    #[test]
    fn run_is_deterministic() {
        let tasks = fixture();
        let query = Query::new().text("a").sort(SortKey::Priority);

        let first = query.run(&tasks, today());
        let second = query.run(&tasks, today());

        assert_eq!(first, second);
    }

    #[test]
    fn run_does_not_touch_input() {
        let tasks = fixture();
        let snapshot = tasks.clone();

        let _ = Query::new().view(View::Completed).sort(SortKey::Title).run(&tasks, today());

        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn today_view_only_has_open_tasks_due_today() {
        let tasks = fixture();
        let out = Query::new().view(View::Today).run(&tasks, today());

        assert_eq!(titles(&out), vec!["Buy milk"]);
        assert!(out.iter().all(|t| t.is_open() && t.due() == Some(today())));
    }

    #[test]
    fn upcoming_view_is_strictly_after_today() {
        let tasks = fixture();
        let out = Query::new().view(View::Upcoming).run(&tasks, today());

        assert_eq!(titles(&out), vec!["Prepare demo"]);
        assert!(out.iter().all(|t| t.due().is_some_and(|d| d > today())));
    }

    #[test]
    fn undated_tasks_never_appear_in_time_views() {
        let tasks = fixture();
        for view in [View::Today, View::Upcoming] {
            let out = Query::new().view(view).run(&tasks, today());
            assert!(out.iter().all(|t| t.due().is_some()), "{view}");
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let tasks = fixture();
        let out = Query::new().text("  MILK ").run(&tasks, today());
        assert_eq!(titles(&out), vec!["Buy milk"]);
    }

    #[test]
    fn search_looks_at_notes_and_tags() {
        let tasks = fixture();

        let by_notes = search(&tasks, "plumber");
        let by_tag = search(&tasks, "GROC");

        assert_eq!(titles(&by_notes), vec!["Fix sink"]);
        assert_eq!(titles(&by_tag), vec!["Buy milk"]);
    }

    #[test]
    fn search_without_match_is_empty() {
        let tasks = fixture();
        assert!(search(&tasks, "zebra").is_empty());
    }

    #[test]
    fn tag_filter_is_exact_and_case_sensitive() {
        let tasks = fixture();
        assert_eq!(filter_by_tag(&tasks, Some("work")).len(), 2);
        assert!(filter_by_tag(&tasks, Some("Work")).is_empty());
        assert!(filter_by_tag(&tasks, Some("wor")).is_empty());
        assert_eq!(filter_by_tag(&tasks, Some("")).len(), tasks.len());
    }

    #[test]
    fn tag_and_view_are_anded() {
        let tasks = fixture();
        let out = Query::new().view(View::Completed).tag("work").run(&tasks, today());

        assert_eq!(titles(&out), vec!["Ship report"]);
        assert!(out.iter().all(|t| t.status == TaskStatus::Completed && t.has_tag("work")));
    }

    #[test]
    fn derived_counts() {
        let tasks = fixture();
        assert_eq!(open_count(&tasks), 3);
        assert_eq!(all_tags(&tasks), vec!["grocery", "home", "work"]);
    }
}
