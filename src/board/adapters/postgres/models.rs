//! Diesel row models for task document storage.

use super::schema::tasks;
use crate::board::domain::{NewTask, TaskDocument, TaskPatch};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional message.
    pub message: Option<String>,
    /// Optional due timestamp.
    pub date: Option<DateTime<Utc>>,
    /// Raw status string.
    pub status: String,
    /// Raw priority string.
    pub priority: Option<String>,
}

impl TaskRow {
    /// Converts the row into the untrusted document shape for decoding.
    #[must_use]
    pub fn into_document(self) -> TaskDocument {
        TaskDocument {
            title: Some(self.title),
            message: self.message,
            date: self.date,
            status: Some(self.status),
            priority: self.priority,
        }
    }
}

/// Insert model for task documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Store-assigned identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional message.
    pub message: Option<String>,
    /// Optional due timestamp.
    pub date: Option<DateTime<Utc>>,
    /// Status string.
    pub status: String,
    /// Priority string.
    pub priority: Option<String>,
}

impl NewTaskRow {
    /// Builds the insert row for a new task under a freshly assigned id.
    #[must_use]
    pub fn new(id: uuid::Uuid, task: &NewTask) -> Self {
        Self {
            id,
            title: task.title().as_str().to_owned(),
            message: task.message().map(str::to_owned),
            date: task.date(),
            status: task.status().as_str().to_owned(),
            priority: task.priority().map(|priority| priority.as_str().to_owned()),
        }
    }
}

/// Partial update for task documents.
///
/// `None` skips a column; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New message.
    pub message: Option<Option<String>>,
    /// New status string.
    pub status: Option<String>,
}

impl From<&TaskPatch> for TaskChangeset {
    fn from(patch: &TaskPatch) -> Self {
        Self {
            title: patch.title().map(|title| title.as_str().to_owned()),
            message: patch.message().map(|message| message.map(str::to_owned)),
            status: patch.status().map(|status| status.as_str().to_owned()),
        }
    }
}
