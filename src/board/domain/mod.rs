//! Domain model for the task board.
//!
//! A task lives in exactly one of three status columns. The domain keeps
//! validation (non-blank titles, closed status set) and the document mapping
//! in one place so every adapter reads the store the same way.

mod document;
mod error;
mod ids;
mod status;
mod task;

pub use document::{TaskDocument, decode_documents};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle, normalize_message};
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch, date_to_timestamp};
