//! Top-level visibility modes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{Task, TaskStatus};

/// View filter (stage 1 of the pipeline).
///
/// - `All`: no filtering.
/// - `Completed`: completed tasks only.
/// - `Today`: open tasks due on `today`.
/// - `Upcoming`: open tasks due on or after the day after `today`.
///
/// Tasks without a parseable due date never show up in `Today` or `Upcoming`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    All,
    Today,
    Upcoming,
    Completed,
}

impl View {
    pub const ALL: [View; 4] = [View::All, View::Today, View::Upcoming, View::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            View::All => "all",
            View::Today => "today",
            View::Upcoming => "upcoming",
            View::Completed => "completed",
        }
    }

    /// Does `task` belong in this view on `today`?
    pub fn admits(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            View::All => true,
            View::Completed => task.status == TaskStatus::Completed,
            View::Today => task.is_open() && task.due() == Some(today),
            View::Upcoming => task.is_open() && task.due().is_some_and(|due| due > today),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0:?}")]
pub struct ParseViewError(String);

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| ParseViewError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, TaskId, TaskPatch};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use ulid::Ulid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn task(due: Option<&str>, completed: bool) -> Task {
        let mut input = NewTask::new("t");
        if let Some(due) = due {
            input = input.with_due_date(due);
        }
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut task = Task::create(TaskId::from_ulid(Ulid::new()), input, now).unwrap();
        if completed {
            task.apply(TaskPatch::new().status(TaskStatus::Completed)).unwrap();
        }
        task
    }

    #[rstest]
    #[case::all_open(View::All, Some("2024-05-10"), false, true)]
    #[case::all_no_due(View::All, None, true, true)]
    #[case::today_due_today(View::Today, Some("2024-05-10"), false, true)]
    #[case::today_but_completed(View::Today, Some("2024-05-10"), true, false)]
    #[case::today_due_tomorrow(View::Today, Some("2024-05-11"), false, false)]
    #[case::today_no_due(View::Today, None, false, false)]
    #[case::today_malformed(View::Today, Some("2024-13-45"), false, false)]
    #[case::upcoming_tomorrow(View::Upcoming, Some("2024-05-11"), false, true)]
    #[case::upcoming_far(View::Upcoming, Some("2025-01-01"), false, true)]
    #[case::upcoming_excludes_today(View::Upcoming, Some("2024-05-10"), false, false)]
    #[case::upcoming_excludes_past(View::Upcoming, Some("2024-05-01"), false, false)]
    #[case::upcoming_excludes_completed(View::Upcoming, Some("2024-05-11"), true, false)]
    #[case::upcoming_no_due(View::Upcoming, None, false, false)]
    #[case::completed_done(View::Completed, None, true, true)]
    #[case::completed_open(View::Completed, Some("2024-05-10"), false, false)]
    fn admits(
        #[case] view: View,
        #[case] due: Option<&str>,
        #[case] completed: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(view.admits(&task(due, completed), today()), expected);
    }

    #[rstest]
    #[case(View::All, "all")]
    #[case(View::Today, "today")]
    #[case(View::Upcoming, "upcoming")]
    #[case(View::Completed, "completed")]
    fn text_form(#[case] view: View, #[case] text: &str) {
        assert_eq!(view.to_string(), text);
        assert_eq!(text.parse::<View>().unwrap(), view);
        assert_eq!(serde_json::to_string(&view).unwrap(), format!("\"{text}\""));
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!("someday".parse::<View>().is_err());
    }
}
