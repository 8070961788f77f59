//! Task creation dialog.

use super::TaskListStore;
use crate::board::{
    domain::{NewTask, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::TaskGateway,
};
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// The title text.
    Title,
    /// The due date.
    Date,
    /// The status selector.
    Status,
}

/// A validation message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field the message belongs to.
    pub field: FormField,
    /// Message shown next to the field.
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: FormField, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Shortcuts offered next to the calendar picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickDate {
    /// The current day.
    Today,
    /// One day ahead.
    Tomorrow,
    /// Three days ahead.
    InThreeDays,
    /// Seven days ahead.
    InOneWeek,
}

impl QuickDate {
    /// Every shortcut, in menu order.
    pub const ALL: [Self; 4] = [Self::Today, Self::Tomorrow, Self::InThreeDays, Self::InOneWeek];

    /// Days added to today.
    #[must_use]
    pub const fn days(self) -> u64 {
        match self {
            Self::Today => 0,
            Self::Tomorrow => 1,
            Self::InThreeDays => 3,
            Self::InOneWeek => 7,
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::InThreeDays => "In 3 days",
            Self::InOneWeek => "In a week",
        }
    }

    /// Resolves the shortcut against a local calendar date.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        today.checked_add_days(Days::new(self.days())).unwrap_or(today)
    }
}

/// Result of pressing Save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The task was stored and added to the board.
    Created(TaskId),
    /// Validation failed; see [`TaskCreationForm::errors`].
    Invalid,
    /// The gateway refused or failed; the dialog keeps its input.
    Failed,
}

/// State of the creation dialog.
#[derive(Debug)]
pub struct TaskCreationForm<C>
where
    C: Clock,
{
    clock: Arc<C>,
    open: bool,
    title: String,
    message: String,
    date: Option<NaiveDate>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    errors: Vec<FieldError>,
}

impl<C> TaskCreationForm<C>
where
    C: Clock,
{
    /// Creates a closed, empty form.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            open: false,
            title: String::new(),
            message: String::new(),
            date: None,
            status: None,
            priority: None,
            errors: Vec::new(),
        }
    }

    /// Shows the dialog.
    pub const fn open(&mut self) {
        self.open = true;
    }

    /// Hides the dialog and clears its input.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Returns `true` while the dialog is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Sets the title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Sets the message text.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Picks a date from the calendar.
    pub const fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Picks a date from a shortcut, relative to the clock's local date.
    pub fn pick_quick_date(&mut self, quick: QuickDate) -> NaiveDate {
        let date = quick.resolve(self.clock.local().date_naive());
        self.date = Some(date);
        date
    }

    /// Chooses a status, replacing the placeholder.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = Some(status);
    }

    /// Chooses or clears the priority.
    pub const fn set_priority(&mut self, priority: Option<TaskPriority>) {
        self.priority = priority;
    }

    /// Returns the title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the chosen date.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the chosen status; `None` while the placeholder is shown.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the chosen priority.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the errors from the last submit.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the error for one field from the last submit.
    #[must_use]
    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    /// Checks every required field and builds the payload.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per failing field.
    pub fn validate(&self) -> Result<NewTask, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = TaskTitle::new(&self.title).ok();
        if title.is_none() {
            errors.push(FieldError::new(FormField::Title, "Title is required"));
        }
        if self.date.is_none() {
            errors.push(FieldError::new(FormField::Date, "Date is required"));
        }
        if self.status.is_none() {
            errors.push(FieldError::new(FormField::Status, "Status is required"));
        }

        match (title, self.date, self.status) {
            (Some(valid_title), Some(date), Some(status)) if errors.is_empty() => {
                let mut task = NewTask::new(valid_title, status)
                    .with_message(&self.message)
                    .with_due_date(date);
                if let Some(priority) = self.priority {
                    task = task.with_priority(priority);
                }
                Ok(task)
            }
            _ => Err(errors),
        }
    }

    /// Validates, writes the task, adds it to the board, and closes the
    /// dialog.
    ///
    /// Nothing is written when validation fails.
    pub async fn submit<G: TaskGateway>(&mut self, store: &mut TaskListStore<G>) -> SubmitOutcome {
        let new_task = match self.validate() {
            Ok(task) => task,
            Err(errors) => {
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };
        self.errors.clear();

        match store.gateway().create(&new_task).await {
            Ok(id) => {
                info!(task_id = %id, status = %new_task.status(), "task created");
                store.append(new_task.into_task(id.clone()));
                self.reset();
                SubmitOutcome::Created(id)
            }
            Err(err) => {
                error!(error = %err, "failed to create task");
                SubmitOutcome::Failed
            }
        }
    }

    fn reset(&mut self) {
        self.open = false;
        self.title.clear();
        self.message.clear();
        self.date = None;
        self.status = None;
        self.priority = None;
        self.errors.clear();
    }
}
