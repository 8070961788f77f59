//! `PostgreSQL` gateway storing task documents as table rows.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{NewTask, Task, TaskId, TaskPatch, decode_documents},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the task gateway.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task gateway.
#[derive(Debug, Clone)]
pub struct PostgresTaskGateway {
    pool: TaskPgPool,
}

impl PostgresTaskGateway {
    /// Creates a gateway from an existing connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::StoreUnavailable`] when the pool cannot
    /// open its initial connections.
    pub fn connect(database_url: &str, pool_size: u32) -> TaskGatewayResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(TaskGatewayError::store_unavailable)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskGatewayResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskGatewayResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskGatewayError::store_unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskGatewayError::store_unavailable)?
    }
}

/// Ids that are not UUIDs cannot name a row in this table.
fn row_id(id: &TaskId) -> TaskGatewayResult<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| TaskGatewayError::NotFound(id.clone()))
}

fn map_write_error(err: DieselError) -> TaskGatewayError {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
            info,
        ) => TaskGatewayError::ValidationRejected(info.message().to_owned()),
        other => TaskGatewayError::store_unavailable(other),
    }
}

#[async_trait]
impl TaskGateway for PostgresTaskGateway {
    async fn list_all(&self) -> TaskGatewayResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskGatewayError::store_unavailable)?;
            Ok(decode_documents(rows.into_iter().map(|row| {
                let id = TaskId::new(row.id.to_string());
                (id, row.into_document())
            })))
        })
        .await
    }

    async fn create(&self, task: &NewTask) -> TaskGatewayResult<TaskId> {
        let id = Uuid::new_v4();
        let new_row = NewTaskRow::new(id, task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(map_write_error)?;
            Ok(())
        })
        .await?;
        debug!(task_id = %id, "task row inserted");
        Ok(TaskId::new(id.to_string()))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskGatewayResult<()> {
        patch
            .ensure_not_empty()
            .map_err(|err| TaskGatewayError::ValidationRejected(err.to_string()))?;
        let key = row_id(id)?;
        let changeset = TaskChangeset::from(patch);
        let affected = self
            .run_blocking(move |connection| {
                diesel::update(tasks::table.find(key))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(map_write_error)
            })
            .await?;
        if affected == 0 {
            return Err(TaskGatewayError::NotFound(id.clone()));
        }
        debug!(task_id = %id, "task row updated");
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> TaskGatewayResult<()> {
        let key = row_id(id)?;
        let affected = self
            .run_blocking(move |connection| {
                diesel::delete(tasks::table.find(key))
                    .execute(connection)
                    .map_err(TaskGatewayError::store_unavailable)
            })
            .await?;
        if affected == 0 {
            return Err(TaskGatewayError::NotFound(id.clone()));
        }
        debug!(task_id = %id, "task row deleted");
        Ok(())
    }
}
