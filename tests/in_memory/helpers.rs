//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use taskwith::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{TaskId, TaskStatus},
    services::{SubmitOutcome, TaskCreationForm, TaskListStore},
};

/// Store type used throughout the in-memory tests.
pub type MemoryStore = TaskListStore<InMemoryTaskGateway>;

/// Provides a fresh, empty collection.
#[fixture]
pub fn gateway() -> Arc<InMemoryTaskGateway> {
    Arc::new(InMemoryTaskGateway::new())
}

/// Builds a store over a shared gateway.
#[must_use]
pub fn store_over(gateway: &Arc<InMemoryTaskGateway>) -> MemoryStore {
    TaskListStore::new(Arc::clone(gateway))
}

/// Returns a fixed calendar date.
///
/// # Panics
///
/// Panics when the date does not exist.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Creates a task through the creation form and returns its id.
///
/// # Errors
///
/// Returns an error when the form does not create the task.
pub async fn create_through_form(
    store: &mut MemoryStore,
    title: &str,
    due: NaiveDate,
    status: TaskStatus,
) -> Result<TaskId, eyre::Report> {
    let mut form = TaskCreationForm::new(Arc::new(DefaultClock));
    form.open();
    form.set_title(title);
    form.set_date(due);
    form.set_status(status);
    match form.submit(store).await {
        SubmitOutcome::Created(id) => Ok(id),
        other => Err(eyre::eyre!("expected task to be created, got {other:?}")),
    }
}

/// Returns the titles shown in one column.
#[must_use]
pub fn column_titles(store: &MemoryStore, status: TaskStatus) -> Vec<String> {
    store
        .column(status)
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
