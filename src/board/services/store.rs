//! Client-side cache of the tasks collection and its per-status views.
//!
//! The store never changes a task until the gateway has confirmed the write.
//! Gateway failures are logged and swallowed here; callers only see an
//! [`Outcome`].

use crate::board::{
    domain::{Task, TaskId, TaskPatch, TaskStatus, TaskTitle, normalize_message},
    ports::{TaskGateway, TaskGatewayError},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Progress of the initial fetch, used to show a loading or empty board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has finished yet.
    NotLoaded,
    /// The last load succeeded.
    Ready,
    /// The last load failed; the collection holds whatever it had before.
    Failed,
}

/// What a mutating store operation did to the local collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway confirmed the write and the local entry changed.
    Applied,
    /// The local entry was removed, either by request or because the store
    /// no longer has it.
    Removed,
    /// Nothing needed to change.
    Unchanged,
    /// The gateway failed; the local collection is untouched.
    Failed,
}

/// In-memory task list mirrored from the gateway.
#[derive(Debug)]
pub struct TaskListStore<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
    tasks: Vec<Task>,
    load_state: LoadState,
}

impl<G> TaskListStore<G>
where
    G: TaskGateway,
{
    /// Creates an empty, not-yet-loaded store.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            load_state: LoadState::NotLoaded,
        }
    }

    /// Returns the gateway the store writes through.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the state of the most recent load.
    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Returns every cached task in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no tasks are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a cached task.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the tasks in one column, in store order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Returns the To Do column.
    #[must_use]
    pub fn todo(&self) -> Vec<&Task> {
        self.column(TaskStatus::ToDo)
    }

    /// Returns the In Progress column.
    #[must_use]
    pub fn in_progress(&self) -> Vec<&Task> {
        self.column(TaskStatus::InProgress)
    }

    /// Returns the Completed column.
    #[must_use]
    pub fn completed(&self) -> Vec<&Task> {
        self.column(TaskStatus::Completed)
    }

    /// Replaces the collection with the gateway's current listing.
    ///
    /// On failure the previous collection is kept and the state becomes
    /// [`LoadState::Failed`].
    pub async fn load_all(&mut self) -> LoadState {
        match self.gateway.list_all().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "task list loaded");
                self.tasks = dedupe(tasks);
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                error!(error = %err, "failed to load tasks");
                self.load_state = LoadState::Failed;
            }
        }
        self.load_state
    }

    /// Adds a task the gateway has just created, replacing any entry with the
    /// same id.
    pub fn append(&mut self, task: Task) {
        if let Some(existing) = self.tasks.iter_mut().find(|cached| cached.id() == task.id()) {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
    }

    /// Moves a task to another column once the gateway accepts the change.
    ///
    /// A task the store no longer has is dropped locally.
    pub async fn apply_status_change(&mut self, id: &TaskId, status: TaskStatus) -> Outcome {
        let patch = TaskPatch::status_only(status);
        self.write_patch(id, patch).await
    }

    /// Changes title and message once the gateway accepts the change.
    ///
    /// Only fields that differ from the cached task are sent. When nothing
    /// differs no write is made.
    pub async fn apply_edit(
        &mut self,
        id: &TaskId,
        title: TaskTitle,
        message: Option<&str>,
    ) -> Outcome {
        let patch = match self.get(id) {
            Some(current) => edit_patch(current, title, message),
            None => TaskPatch::default().with_title(title).with_message(message),
        };
        if patch.is_empty() {
            debug!(task_id = %id, "edit changes nothing; skipping write");
            return Outcome::Unchanged;
        }
        self.write_patch(id, patch).await
    }

    /// Deletes a task. A task the store has already lost counts as deleted.
    pub async fn apply_delete(&mut self, id: &TaskId) -> Outcome {
        match self.gateway.delete(id).await {
            Ok(()) => {
                info!(task_id = %id, "task deleted");
                self.remove_local(id)
            }
            Err(TaskGatewayError::NotFound(_)) => {
                debug!(task_id = %id, "task already deleted in store");
                self.remove_local(id)
            }
            Err(err) => {
                error!(task_id = %id, error = %err, "failed to delete task");
                Outcome::Failed
            }
        }
    }

    async fn write_patch(&mut self, id: &TaskId, patch: TaskPatch) -> Outcome {
        match self.gateway.update(id, &patch).await {
            Ok(()) => {
                let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
                    debug!(task_id = %id, "updated task is not cached");
                    return Outcome::Unchanged;
                };
                task.apply_patch(&patch);
                info!(task_id = %id, status = %task.status(), "task updated");
                Outcome::Applied
            }
            Err(TaskGatewayError::NotFound(_)) => {
                warn!(task_id = %id, "task vanished from store; dropping stale entry");
                self.remove_local(id);
                Outcome::Removed
            }
            Err(err) => {
                error!(task_id = %id, error = %err, "failed to update task");
                Outcome::Failed
            }
        }
    }

    fn remove_local(&mut self, id: &TaskId) -> Outcome {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        if self.tasks.len() == before {
            Outcome::Unchanged
        } else {
            Outcome::Removed
        }
    }
}

fn edit_patch(current: &Task, title: TaskTitle, message: Option<&str>) -> TaskPatch {
    let mut patch = TaskPatch::default();
    if current.title() != &title {
        patch = patch.with_title(title);
    }
    if current.message() != normalize_message(message).as_deref() {
        patch = patch.with_message(message);
    }
    patch
}

/// Keeps the first occurrence of each id.
fn dedupe(tasks: Vec<Task>) -> Vec<Task> {
    let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
    for task in tasks {
        if unique.iter().any(|kept| kept.id() == task.id()) {
            warn!(task_id = %task.id(), "duplicate id in listing; ignoring");
            continue;
        }
        unique.push(task);
    }
    unique
}
