//! Sort keys (stage 4 of the pipeline).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::Task;

/// Sort key.
///
/// All orderings are applied with a stable sort, so tasks that compare equal
/// keep their relative input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// updated_at descending.
    #[default]
    Updated,
    /// Due date ascending, undated last; then priority descending, then title ascending.
    Due,
    /// Priority descending. No tie-break.
    Priority,
    /// Title ascending, case-sensitive.
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Updated, SortKey::Due, SortKey::Priority, SortKey::Title];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Updated => "updated",
            SortKey::Due => "due",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
        }
    }

    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Updated => b.updated_at.cmp(&a.updated_at),
            SortKey::Due => compare_due(a, b)
                .then_with(|| b.priority.cmp(&a.priority))
                .then_with(|| a.title.cmp(&b.title)),
            SortKey::Priority => b.priority.cmp(&a.priority),
            SortKey::Title => a.title.cmp(&b.title),
        }
    }
}

/// Dated before undated; unparseable counts as undated.
fn compare_due(a: &Task, b: &Task) -> Ordering {
    match (a.due(), b.due()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns a sorted copy; `tasks` is left as is.
pub fn sort_tasks(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0:?}")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, Priority, TaskId};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use ulid::Ulid;

    fn task(title: &str, priority: u8, due: Option<&str>, minute: u32) -> Task {
        let mut input = NewTask::new(title).with_priority(Priority::new(priority).unwrap());
        if let Some(due) = due {
            input = input.with_due_date(due);
        }
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, minute, 0).unwrap();
        Task::create(TaskId::from_ulid(Ulid::new()), input, now).unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn priority_sort_is_stable() {
        let input = vec![task("B", 1, None, 0), task("A", 1, None, 1)];
        let sorted = sort_tasks(&input, SortKey::Priority);
        assert_eq!(titles(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn priority_sort_puts_urgent_first() {
        let input = vec![task("low", 0, None, 0), task("urgent", 3, None, 1), task("normal", 1, None, 2)];
        let sorted = sort_tasks(&input, SortKey::Priority);
        assert_eq!(titles(&sorted), vec!["urgent", "normal", "low"]);
    }

    #[test]
    fn due_sort_is_ascending_with_undated_last() {
        let input = vec![
            task("jan3", 1, Some("2024-01-03"), 0),
            task("jan1", 1, Some("2024-01-01"), 1),
            task("none", 1, None, 2),
        ];
        let sorted = sort_tasks(&input, SortKey::Due);
        assert_eq!(titles(&sorted), vec!["jan1", "jan3", "none"]);
    }

    #[test]
    fn due_sort_breaks_ties_by_priority_then_title() {
        let input = vec![
            task("b", 1, Some("2024-01-01"), 0),
            task("a", 1, Some("2024-01-01"), 1),
            task("z", 3, Some("2024-01-01"), 2),
        ];
        let sorted = sort_tasks(&input, SortKey::Due);
        assert_eq!(titles(&sorted), vec!["z", "a", "b"]);
    }

    #[test]
    fn due_sort_treats_malformed_as_undated() {
        let input = vec![task("bad", 1, Some("whenever"), 0), task("ok", 1, Some("2030-01-01"), 1)];
        let sorted = sort_tasks(&input, SortKey::Due);
        assert_eq!(titles(&sorted), vec!["ok", "bad"]);
    }

    #[test]
    fn title_sort_is_case_sensitive() {
        let input = vec![task("banana", 1, None, 0), task("Cherry", 1, None, 1), task("apple", 1, None, 2)];
        let sorted = sort_tasks(&input, SortKey::Title);
        assert_eq!(titles(&sorted), vec!["Cherry", "apple", "banana"]);
    }

    #[test]
    fn updated_sort_is_most_recent_first() {
        let input = vec![task("old", 1, None, 0), task("new", 1, None, 30), task("mid", 1, None, 10)];
        let sorted = sort_tasks(&input, SortKey::Updated);
        assert_eq!(titles(&sorted), vec!["new", "mid", "old"]);
    }

    #[test]
    fn input_is_not_reordered() {
        let input = vec![task("b", 1, None, 0), task("a", 1, None, 1)];
        let _ = sort_tasks(&input, SortKey::Title);
        assert_eq!(titles(&input), vec!["b", "a"]);
    }

    #[rstest]
    #[case(SortKey::Updated, "updated")]
    #[case(SortKey::Due, "due")]
    #[case(SortKey::Priority, "priority")]
    #[case(SortKey::Title, "title")]
    fn text_form(#[case] key: SortKey, #[case] text: &str) {
        assert_eq!(key.to_string(), text);
        assert_eq!(text.parse::<SortKey>().unwrap(), key);
    }
}
