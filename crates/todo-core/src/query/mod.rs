//! Query module: the pure view -> tag -> search -> sort pipeline.
//!
//! Design intent:
//! - Works on a slice of the full in-memory task set and returns a new `Vec`.
//! - Never touches the store; the caller decides when to recompute.
//! - `today` is passed in, so results do not depend on the wall clock.

mod pipeline;
mod sort;
mod view;

pub use pipeline::{Query, all_tags, filter_by_tag, filter_by_view, open_count, search};
pub use sort::{ParseSortKeyError, SortKey, sort_tasks};
pub use view::{ParseViewError, View};
