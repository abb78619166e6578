//! Due date with date-only semantics.

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A due date as text.
///
/// User input goes through `new`, which reduces an RFC 3339 timestamp to its
/// local calendar day, so new records always hold `YYYY-MM-DD`. Stored text is
/// reloaded verbatim with `from_stored`. `date()` never consults the local
/// zone: a timestamp that is still stored reads as the day in its own offset,
/// anything unparseable reads as "no due date".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    /// Editor input. Blank means "no due date".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let due = Self::from_stored(raw)?;
        match DateTime::parse_from_rfc3339(&due.0) {
            Ok(ts) => Some(Self::from_date(ts.with_timezone(&Local).date_naive())),
            Err(_) => Some(due),
        }
    }

    /// Text read back from storage; kept as is apart from trimming.
    pub fn from_stored(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    /// The calendar day after `today` (the editor's "Tomorrow" shortcut).
    pub fn day_after(today: NaiveDate) -> Self {
        Self::from_date(today.succ_opt().unwrap_or(today))
    }

    /// One week after `today` (the "+7 days" shortcut).
    pub fn week_after(today: NaiveDate) -> Self {
        Self::from_date(today.checked_add_days(Days::new(7)).unwrap_or(today))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn date(&self) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(&self.0, DATE_FORMAT) {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(&self.0).ok().map(|ts| ts.date_naive())
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
