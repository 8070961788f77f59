//! Shared world state for task board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwith::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{TaskId, TaskStatus},
    services::{Outcome, TaskCreationForm, TaskListStore},
};

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub gateway: Arc<InMemoryTaskGateway>,
    pub store: TaskListStore<InMemoryTaskGateway>,
    pub form: TaskCreationForm<DefaultClock>,
    pub ids_by_title: HashMap<String, TaskId>,
    pub last_outcome: Option<Outcome>,
}

impl TaskBoardWorld {
    /// Creates a world over an empty collection.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryTaskGateway::new());
        Self {
            store: TaskListStore::new(Arc::clone(&gateway)),
            gateway,
            form: TaskCreationForm::new(Arc::new(DefaultClock)),
            ids_by_title: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Looks up the id of a task created in this scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that title was created.
    pub fn id_of(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.ids_by_title
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Parses a status written either as stored or as a column heading.
///
/// # Errors
///
/// Returns an error for unknown statuses.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
