//! Documents written by other clients and caches that have gone stale.

use std::sync::Arc;

use super::helpers::{column_titles, create_through_form, date, gateway, store_over};
use rstest::rstest;
use serde_json::json;
use taskwith::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{TaskPriority, TaskStatus},
    ports::TaskGateway,
    services::{LoadState, Outcome},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_documents_are_sanitized(
    gateway: Arc<InMemoryTaskGateway>,
) -> Result<(), eyre::Report> {
    gateway.insert_document(json!({"title": "Legacy", "status": "In Progress", "priority": "Low"}))?;
    gateway.insert_document(json!({"title": "Unknown state", "status": "Blocked"}))?;
    gateway.insert_document(json!({"title": "Odd priority", "status": "ToDo", "priority": "Critical"}))?;
    gateway.insert_document(json!({"status": "ToDo"}))?;

    let mut store = store_over(&gateway);
    eyre::ensure!(store.load_all().await == LoadState::Ready, "load failed");

    eyre::ensure!(store.len() == 3, "expected 3 cards, got {}", store.len());
    eyre::ensure!(
        column_titles(&store, TaskStatus::ToDo) == vec!["Unknown state", "Odd priority"],
        "unexpected To Do column"
    );
    let legacy = store
        .in_progress()
        .first()
        .map(|task| task.priority())
        .ok_or_else(|| eyre::eyre!("legacy task missing"))?;
    eyre::ensure!(legacy == Some(TaskPriority::Low), "priority lost");
    let odd = store
        .todo()
        .iter()
        .find(|task| task.title().as_str() == "Odd priority")
        .map(|task| task.priority());
    eyre::ensure!(odd == Some(None), "unknown priority should be unset");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_card_is_dropped_after_remote_delete(
    gateway: Arc<InMemoryTaskGateway>,
) -> Result<(), eyre::Report> {
    let mut mine = store_over(&gateway);
    let id = create_through_form(&mut mine, "Shared task", date(2026, 10, 25), TaskStatus::ToDo).await?;

    let mut theirs = store_over(&gateway);
    theirs.load_all().await;
    eyre::ensure!(theirs.apply_delete(&id).await == Outcome::Removed, "remote delete failed");

    let outcome = mine.apply_status_change(&id, TaskStatus::Completed).await;

    eyre::ensure!(outcome == Outcome::Removed, "expected stale entry removal, got {outcome:?}");
    eyre::ensure!(mine.is_empty(), "stale card still shown");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_reload_keeps_board(gateway: Arc<InMemoryTaskGateway>) -> Result<(), eyre::Report> {
    let mut store = store_over(&gateway);
    create_through_form(&mut store, "Keep me", date(2026, 10, 25), TaskStatus::InProgress).await?;
    gateway.fail_next_list();

    eyre::ensure!(store.load_all().await == LoadState::Failed, "reload should fail");
    eyre::ensure!(column_titles(&store, TaskStatus::InProgress) == vec!["Keep me"], "board cleared");

    eyre::ensure!(store.load_all().await == LoadState::Ready, "retry should succeed");
    eyre::ensure!(gateway.list_all().await?.len() == 1, "store changed");
    Ok(())
}
