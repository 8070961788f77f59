//! Task entity, creation payload, and partial update types.

use super::{TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle, normalize_message};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Converts a calendar date into the timestamp stored by the document store.
#[must_use]
pub fn date_to_timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// A persisted work item shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    message: Option<String>,
    date: Option<DateTime<Utc>>,
    status: TaskStatus,
    priority: Option<TaskPriority>,
}

/// Parameter object for reconstructing a task read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted message, if any.
    pub message: Option<String>,
    /// Persisted due timestamp, if any.
    pub date: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority, if any.
    pub priority: Option<TaskPriority>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            message: data.message,
            date: data.date,
            status: data.status,
            priority: data.priority,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the stored due timestamp, if any.
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    /// Returns the due date as a calendar date in UTC.
    ///
    /// Dates chosen on the board are stored as UTC midnight, so the UTC day
    /// is the day that was picked. Timestamps written elsewhere with an
    /// offset are shown on their UTC day.
    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.date.map(|timestamp| timestamp.date_naive())
    }

    /// Returns the column the task belongs to.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Applies a patch that the store has already accepted.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(message) = patch.message() {
            self.message = message.map(str::to_owned);
        }
        if let Some(status) = patch.status() {
            self.status = status;
        }
    }
}

/// Fields of a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    message: Option<String>,
    date: Option<DateTime<Utc>>,
    status: TaskStatus,
    priority: Option<TaskPriority>,
}

impl NewTask {
    /// Creates a payload with the required fields.
    #[must_use]
    pub const fn new(title: TaskTitle, status: TaskStatus) -> Self {
        Self {
            title,
            message: None,
            date: None,
            status,
            priority: None,
        }
    }

    /// Sets the message. Blank text leaves it unset.
    #[must_use]
    pub fn with_message(mut self, message: impl AsRef<str>) -> Self {
        self.message = normalize_message(Some(message.as_ref()));
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date_to_timestamp(date));
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Combines the payload with the identifier the store assigned to it.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            message: self.message,
            date: self.date,
            status: self.status,
            priority: self.priority,
        }
    }
}

/// Partial update sent to the store.
///
/// Fields left as `None` are not touched. For `message`, `Some(None)` clears
/// the stored message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    message: Option<Option<String>>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates a patch that changes only the status.
    #[must_use]
    pub const fn status_only(status: TaskStatus) -> Self {
        Self {
            title: None,
            message: None,
            status: Some(status),
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets a new message; blank or `None` clears it.
    #[must_use]
    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.message = Some(normalize_message(message));
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the new message, if changed. The inner `None` means cleared.
    #[must_use]
    pub fn message(&self) -> Option<Option<&str>> {
        self.message.as_ref().map(Option::as_deref)
    }

    /// Returns the new status, if changed.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.message.is_none() && self.status.is_none()
    }

    /// Rejects patches that change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPatch`] when no field is set.
    pub const fn ensure_not_empty(&self) -> Result<(), TaskDomainError> {
        if self.is_empty() {
            return Err(TaskDomainError::EmptyPatch);
        }
        Ok(())
    }
}
