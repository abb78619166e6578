//! Task record, creation input and merge patch.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::due::DueDate;
use super::errors::ValidationError;
use super::ids::TaskId;
use super::priority::Priority;
use super::state::TaskStatus;
use super::timestamp;

/// A todo item.
///
/// Design:
/// - `id` and `created_at` are fixed at creation; `TaskPatch` has no field for either.
/// - Every mutation goes through `apply` + `touch`, so `updated_at` strictly increases.
/// - Completion does not clear `due_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new open task from user input.
    pub fn create(id: TaskId, input: NewTask, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let title = normalize_title(&input.title)?;
        let now = timestamp::truncate(now);
        Ok(Self {
            id,
            title,
            notes: input.notes.and_then(normalize_notes),
            status: TaskStatus::Open,
            due_date: input.due_date.and_then(DueDate::new),
            priority: input.priority.unwrap_or_default(),
            tags: input.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Shallow-merge `patch` onto this record.
    ///
    /// The patch is validated before any field changes, so an error leaves
    /// the record untouched. Does not bump `updated_at`; call `touch`.
    pub fn apply(&mut self, patch: TaskPatch) -> Result<(), ValidationError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes.and_then(normalize_notes);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date.and_then(DueDate::new);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        Ok(())
    }

    /// Refresh `updated_at`.
    ///
    /// The new value is `max(now, updated_at + 1ms)`: strictly increasing
    /// even when the clock has not moved, and never before `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = timestamp::truncate(now).max(floor);
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Parsed due date; `None` when missing or unparseable.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_ref().and_then(DueDate::date)
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// `needle` must already be lower-cased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(needle))
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

fn normalize_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn normalize_notes(raw: String) -> Option<String> {
    let notes = raw.trim();
    (!notes.is_empty()).then(|| notes.to_string())
}

/// Input for creating a task. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update. `None` leaves a field as is.
///
/// `notes` and `due_date` are doubly optional: `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    pub fn clear_notes(mut self) -> Self {
        self.notes = Some(None);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
