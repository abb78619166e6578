//! Domain model (ids, task record, status, priority, due date, errors).
//!
//! このモジュールは永続化や UI を前提にしない。
//! ports / impls / app / query はすべてここで定義した型の上に組み立てる。

pub mod due;
pub mod errors;
pub mod ids;
pub mod priority;
pub mod state;
pub mod tags;
pub mod task;
pub mod timestamp;

pub use self::due::DueDate;
pub use self::errors::{BoxError, ErrorKind, StorageError, TodoError, ValidationError};
pub use self::ids::{ParseTaskIdError, TaskId};
pub use self::priority::Priority;
pub use self::state::{ParseStatusError, TaskStatus};
pub use self::tags::{format_tags, parse_tags};
pub use self::task::{NewTask, Task, TaskPatch};
