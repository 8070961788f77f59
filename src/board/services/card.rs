//! Per-card controller: status menu, context menu, inline editing, and
//! drag-and-drop between columns.
//!
//! A [`TaskCard`] owns only view-local state (edit buffers and the menu
//! anchor). Task data is always read from the [`TaskListStore`] and every
//! change goes through it, so a card never shows an unconfirmed value.

use super::{Outcome, TaskListStore};
use crate::board::{
    domain::{Task, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::TaskGateway,
};
use thiserror::Error;
use tracing::debug;

/// Date format used on cards.
pub const CARD_DATE_FORMAT: &str = "%d/%m/%Y";

/// Text shown when a task has no due date.
pub const MISSING_DATE_LABEL: &str = "N/A";

/// Errors returned by card interactions that never reach the gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardError {
    /// The card's task is no longer in the store.
    #[error("task {0} is not on the board")]
    TaskMissing(TaskId),

    /// An editing action was used while the card was not being edited.
    #[error("card is not in edit mode")]
    NotEditing,

    /// The edited fields are invalid.
    #[error(transparent)]
    Invalid(#[from] TaskDomainError),
}

/// Where the context menu was opened, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuAnchor {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

/// Unsaved title and message while a card is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    /// Title text as typed.
    pub title: String,
    /// Message text as typed.
    pub message: String,
}

/// Whether the card shows the task or an edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMode {
    /// Read-only display.
    Viewing,
    /// Inline edit form with its buffers.
    Editing(EditBuffer),
}

/// Data carried while a card is dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    /// Dragged task.
    pub id: TaskId,
    /// Column the drag started from.
    pub current_status: TaskStatus,
}

/// Render-ready snapshot of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCardView {
    /// Task title.
    pub title: String,
    /// Message, if any.
    pub message: Option<String>,
    /// Column label of the current status.
    pub status_label: &'static str,
    /// Priority badge text, if a priority is set.
    pub priority_badge: Option<&'static str>,
    /// Due date as `dd/MM/yyyy`, or `N/A`.
    pub due_date: String,
}

impl TaskCardView {
    /// Builds the view for a task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            message: task.message().map(str::to_owned),
            status_label: task.status().label(),
            priority_badge: task.priority().map(TaskPriority::as_str),
            due_date: task.due_date().map_or_else(
                || MISSING_DATE_LABEL.to_owned(),
                |date| date.format(CARD_DATE_FORMAT).to_string(),
            ),
        }
    }
}

/// Controller state for one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    task_id: TaskId,
    mode: CardMode,
    context_menu: Option<MenuAnchor>,
}

impl TaskCard {
    /// Creates a card in viewing mode with its menu closed.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            mode: CardMode::Viewing,
            context_menu: None,
        }
    }

    /// Returns the task this card shows.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> &CardMode {
        &self.mode
    }

    /// Returns `true` while the inline edit form is shown.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, CardMode::Editing(_))
    }

    /// Returns `true` while the context menu is shown.
    #[must_use]
    pub const fn is_context_menu_open(&self) -> bool {
        self.context_menu.is_some()
    }

    /// Returns where the context menu was opened.
    #[must_use]
    pub const fn context_menu_anchor(&self) -> Option<MenuAnchor> {
        self.context_menu
    }

    /// Opens the context menu, from a right-click or the menu button.
    pub const fn open_context_menu(&mut self, anchor: MenuAnchor) {
        self.context_menu = Some(anchor);
    }

    /// Closes the context menu without choosing anything.
    pub const fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Builds the render snapshot, or `None` once the task is gone.
    #[must_use]
    pub fn view<G: TaskGateway>(&self, store: &TaskListStore<G>) -> Option<TaskCardView> {
        store.get(&self.task_id).map(TaskCardView::from_task)
    }

    /// Enters edit mode with buffers seeded from the cached task.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::TaskMissing`] when the task has left the store.
    pub fn choose_edit<G: TaskGateway>(&mut self, store: &TaskListStore<G>) -> Result<(), CardError> {
        let task = store
            .get(&self.task_id)
            .ok_or_else(|| CardError::TaskMissing(self.task_id.clone()))?;
        self.mode = CardMode::Editing(EditBuffer {
            title: task.title().as_str().to_owned(),
            message: task.message().unwrap_or_default().to_owned(),
        });
        Ok(())
    }

    /// Replaces the title buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::NotEditing`] outside edit mode.
    pub fn edit_title(&mut self, title: impl Into<String>) -> Result<(), CardError> {
        self.buffer_mut()?.title = title.into();
        Ok(())
    }

    /// Replaces the message buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::NotEditing`] outside edit mode.
    pub fn edit_message(&mut self, message: impl Into<String>) -> Result<(), CardError> {
        self.buffer_mut()?.message = message.into();
        Ok(())
    }

    /// Leaves edit mode, discarding the buffers.
    pub fn cancel_edit(&mut self) {
        self.mode = CardMode::Viewing;
    }

    /// Saves the buffers through the store.
    ///
    /// On a gateway failure the card stays in edit mode with its buffers so
    /// nothing the user typed is lost. Otherwise it returns to viewing and
    /// the context menu closes.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::NotEditing`] outside edit mode, or
    /// [`CardError::Invalid`] for a blank title; neither touches the gateway.
    pub async fn save<G: TaskGateway>(
        &mut self,
        store: &mut TaskListStore<G>,
    ) -> Result<Outcome, CardError> {
        let CardMode::Editing(buffer) = &self.mode else {
            return Err(CardError::NotEditing);
        };
        let title = TaskTitle::new(&buffer.title)?;
        let message = buffer.message.clone();

        let outcome = store
            .apply_edit(&self.task_id, title, Some(message.as_str()))
            .await;
        if outcome != Outcome::Failed {
            self.mode = CardMode::Viewing;
            self.close_context_menu();
        }
        Ok(outcome)
    }

    /// Deletes the task through the store and closes the menu.
    pub async fn choose_delete<G: TaskGateway>(&mut self, store: &mut TaskListStore<G>) -> Outcome {
        self.close_context_menu();
        let outcome = store.apply_delete(&self.task_id).await;
        if outcome != Outcome::Failed {
            self.mode = CardMode::Viewing;
        }
        outcome
    }

    /// Picks a status from the card's dropdown.
    pub async fn select_status<G: TaskGateway>(
        &mut self,
        store: &mut TaskListStore<G>,
        status: TaskStatus,
    ) -> Outcome {
        let outcome = store.apply_status_change(&self.task_id, status).await;
        if outcome != Outcome::Failed {
            self.mode = CardMode::Viewing;
            self.close_context_menu();
        }
        outcome
    }

    /// Starts a drag, or `None` once the task is gone.
    #[must_use]
    pub fn drag_payload<G: TaskGateway>(&self, store: &TaskListStore<G>) -> Option<DragPayload> {
        store.get(&self.task_id).map(|task| DragPayload {
            id: task.id().clone(),
            current_status: task.status(),
        })
    }

    fn buffer_mut(&mut self) -> Result<&mut EditBuffer, CardError> {
        match &mut self.mode {
            CardMode::Editing(buffer) => Ok(buffer),
            CardMode::Viewing => Err(CardError::NotEditing),
        }
    }
}

/// Handles a card dropped on a column; the column's status is the new
/// status. Dropping on the column the card came from makes no write.
pub async fn drop_on<G: TaskGateway>(
    store: &mut TaskListStore<G>,
    payload: &DragPayload,
    column: TaskStatus,
) -> Outcome {
    if payload.current_status == column {
        debug!(task_id = %payload.id, "dropped on its own column");
        return Outcome::Unchanged;
    }
    store.apply_status_change(&payload.id, column).await
}
