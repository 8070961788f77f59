//! Raw document shape exchanged with the external store.
//!
//! Documents are untrusted: another client may have written a status or
//! priority this crate does not know. Decoding validates each field and
//! falls back to a safe value instead of passing drift through to the board.

use super::{
    NewTask, PersistedTaskData, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus,
    TaskTitle,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Field set of a document in the tasks collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    /// Task title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-text message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Due timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Status string as written by whichever client stored it.
    #[serde(default)]
    pub status: Option<String>,
    /// Priority string, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl TaskDocument {
    /// Builds the document written for a new task.
    #[must_use]
    pub fn from_new_task(task: &NewTask) -> Self {
        Self {
            title: Some(task.title().as_str().to_owned()),
            message: task.message().map(str::to_owned),
            date: task.date(),
            status: Some(task.status().as_str().to_owned()),
            priority: task.priority().map(|priority| priority.as_str().to_owned()),
        }
    }

    /// Validates the document into a [`Task`].
    ///
    /// An unknown or missing status becomes [`TaskStatus::ToDo`] and an
    /// unknown priority is dropped; both are logged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is missing or
    /// blank, since such a document cannot be shown as a card.
    pub fn decode(self, id: TaskId) -> Result<Task, TaskDomainError> {
        let title = TaskTitle::new(self.title.unwrap_or_default())?;
        let status = decode_status(&id, self.status.as_deref());
        let priority = self
            .priority
            .as_deref()
            .and_then(|raw| decode_priority(&id, raw));

        Ok(Task::from_persisted(PersistedTaskData {
            id,
            title,
            message: super::normalize_message(self.message.as_deref()),
            date: self.date,
            status,
            priority,
        }))
    }
}

fn decode_status(id: &TaskId, raw: Option<&str>) -> TaskStatus {
    let Some(value) = raw else {
        warn!(task_id = %id, "document has no status; defaulting to ToDo");
        return TaskStatus::ToDo;
    };
    TaskStatus::try_from(value).unwrap_or_else(|err| {
        warn!(task_id = %id, error = %err, "unrecognized status; defaulting to ToDo");
        TaskStatus::ToDo
    })
}

fn decode_priority(id: &TaskId, raw: &str) -> Option<TaskPriority> {
    if raw.trim().is_empty() {
        return None;
    }
    match TaskPriority::try_from(raw) {
        Ok(priority) => Some(priority),
        Err(err) => {
            warn!(task_id = %id, error = %err, "unrecognized priority; leaving unset");
            None
        }
    }
}

/// Decodes a batch of documents, skipping those that cannot become tasks.
pub fn decode_documents<I>(documents: I) -> Vec<Task>
where
    I: IntoIterator<Item = (TaskId, TaskDocument)>,
{
    documents
        .into_iter()
        .filter_map(|(id, document)| {
            let log_id = id.clone();
            document
                .decode(id)
                .inspect_err(|err| warn!(task_id = %log_id, error = %err, "skipping document"))
                .ok()
        })
        .collect()
}
