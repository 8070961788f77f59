//! CRUD and decoding against real `PostgreSQL` rows.

use chrono::NaiveDate;
use rstest::rstest;
use taskwith::board::{
    domain::{NewTask, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskGateway, TaskGatewayError},
};

use super::helpers::setup_gateway;

fn new_task(title: &str, status: TaskStatus) -> Result<NewTask, eyre::Report> {
    Ok(NewTask::new(TaskTitle::new(title)?, status))
}

fn due() -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(2026, 10, 25).ok_or_else(|| eyre::eyre!("invalid date"))
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_list_in_creation_order() -> Result<(), eyre::Report> {
    let (_schema, gateway) = setup_gateway()?;
    let first = gateway
        .create(
            &new_task("Draft spec", TaskStatus::ToDo)?
                .with_message("Outline first")
                .with_due_date(due()?)
                .with_priority(TaskPriority::High),
        )
        .await?;
    let second = gateway.create(&new_task("Review", TaskStatus::InProgress)?).await?;

    let tasks = gateway.list_all().await?;

    let ids: Vec<&TaskId> = tasks.iter().map(|task| task.id()).collect();
    eyre::ensure!(ids == vec![&first, &second], "unexpected order {ids:?}");
    let draft = tasks.first().ok_or_else(|| eyre::eyre!("no tasks"))?;
    eyre::ensure!(draft.message() == Some("Outline first"), "message lost");
    eyre::ensure!(draft.due_date() == Some(due()?), "due date changed");
    eyre::ensure!(draft.priority() == Some(TaskPriority::High), "priority lost");
    Ok(())
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn update_touches_only_patched_columns() -> Result<(), eyre::Report> {
    let (_schema, gateway) = setup_gateway()?;
    let id = gateway
        .create(&new_task("Draft spec", TaskStatus::ToDo)?.with_message("Outline first"))
        .await?;

    gateway
        .update(&id, &TaskPatch::status_only(TaskStatus::Completed))
        .await?;
    let after_status = gateway.list_all().await?;
    let task = after_status.first().ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(task.status() == TaskStatus::Completed, "status not written");
    eyre::ensure!(task.message() == Some("Outline first"), "message overwritten");

    gateway
        .update(&id, &TaskPatch::default().with_message(None))
        .await?;
    let after_clear = gateway.list_all().await?;
    let cleared = after_clear.first().ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(cleared.message().is_none(), "message not cleared");
    eyre::ensure!(cleared.title().as_str() == "Draft spec", "title overwritten");
    Ok(())
}

#[rstest]
#[case(TaskId::new("00000000-0000-4000-8000-000000000000"))]
#[case(TaskId::new("not-a-uuid"))]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_ids_are_not_found(#[case] id: TaskId) -> Result<(), eyre::Report> {
    let (_schema, gateway) = setup_gateway()?;

    let update = gateway
        .update(&id, &TaskPatch::status_only(TaskStatus::Completed))
        .await;
    let delete = gateway.delete(&id).await;

    eyre::ensure!(matches!(update, Err(TaskGatewayError::NotFound(_))), "update gave {update:?}");
    eyre::ensure!(matches!(delete, Err(TaskGatewayError::NotFound(_))), "delete gave {delete:?}");
    Ok(())
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn delete_twice_reports_not_found() -> Result<(), eyre::Report> {
    let (_schema, gateway) = setup_gateway()?;
    let id = gateway.create(&new_task("Old chore", TaskStatus::ToDo)?).await?;

    gateway.delete(&id).await?;
    let second = gateway.delete(&id).await;

    eyre::ensure!(matches!(second, Err(TaskGatewayError::NotFound(_))), "second delete gave {second:?}");
    eyre::ensure!(gateway.list_all().await?.is_empty(), "row still present");
    Ok(())
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn long_titles_are_stored_whole() -> Result<(), eyre::Report> {
    let (_schema, gateway) = setup_gateway()?;
    let title = "x".repeat(300);

    let id = gateway.create(&new_task(&title, TaskStatus::ToDo)?).await?;
    gateway
        .update(
            &id,
            &TaskPatch::default().with_title(TaskTitle::new("y".repeat(1000))?),
        )
        .await?;

    let tasks = gateway.list_all().await?;
    let stored = tasks.first().ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(stored.title().as_str().len() == 1000, "title truncated or rejected");
    Ok(())
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn empty_patch_is_rejected() -> Result<(), eyre::Report> {
    let (_schema, gateway) = setup_gateway()?;
    let id = gateway.create(&new_task("Draft spec", TaskStatus::ToDo)?).await?;

    let result = gateway.update(&id, &TaskPatch::default()).await;

    eyre::ensure!(
        matches!(result, Err(TaskGatewayError::ValidationRejected(_))),
        "empty patch gave {result:?}"
    );
    Ok(())
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn rows_written_by_other_clients_are_sanitized() -> Result<(), eyre::Report> {
    let (schema, gateway) = setup_gateway()?;
    schema.execute(
        "INSERT INTO tasks (id, title, status, priority) VALUES \
         ('11111111-1111-4111-8111-111111111111', 'Legacy', 'In Progress', 'low')",
    )?;
    schema.execute(
        "INSERT INTO tasks (id, title, status, priority) VALUES \
         ('22222222-2222-4222-8222-222222222222', 'Drifted', 'Blocked', 'Urgent')",
    )?;

    let tasks = gateway.list_all().await?;

    let summary: Vec<(&str, TaskStatus, Option<TaskPriority>)> = tasks
        .iter()
        .map(|task| (task.title().as_str(), task.status(), task.priority()))
        .collect();
    eyre::ensure!(
        summary
            == vec![
                ("Legacy", TaskStatus::InProgress, Some(TaskPriority::Low)),
                ("Drifted", TaskStatus::ToDo, None),
            ],
        "unexpected decode {summary:?}"
    );
    Ok(())
}

#[rstest]
#[ignore = "needs TASKWITH_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_violates_check_constraint() -> Result<(), eyre::Report> {
    let (schema, _gateway) = setup_gateway()?;

    let result = schema.execute(
        "INSERT INTO tasks (id, title, status) VALUES \
         ('33333333-3333-4333-8333-333333333333', '   ', 'ToDo')",
    );

    eyre::ensure!(result.is_err(), "blank title was accepted");
    Ok(())
}
