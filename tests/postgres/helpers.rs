//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Every test gets its own schema so tests can run in parallel against one
//! database. Pool connections are pinned to that schema through
//! `search_path`.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Error as PoolError, Pool};
use eyre::WrapErr;
use taskwith::board::adapters::postgres::{PostgresTaskGateway, TaskPgPool};
use uuid::Uuid;

/// Environment variable holding the test database URL.
pub const TEST_DATABASE_URL_ENV: &str = "TASKWITH_TEST_DATABASE_URL";

/// SQL that creates the tasks table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks/up.sql");

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, PoolError> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), PoolError> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(PoolError::QueryError)
    }
}

/// Schema created for one test and dropped when the value goes away.
pub struct TestSchema {
    pool: TaskPgPool,
    name: String,
}

impl TestSchema {
    /// Runs raw SQL inside the test schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute(&self, sql: &str) -> Result<(), eyre::Report> {
        let mut connection = self.pool.get().wrap_err("check out connection")?;
        connection.batch_execute(sql).wrap_err("run raw SQL")?;
        Ok(())
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        let dropped = self.pool.get().map_err(eyre::Report::from).and_then(|mut connection| {
            connection
                .batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name))
                .map_err(eyre::Report::from)
        });
        if let Err(err) = dropped {
            tracing::warn!(schema = %self.name, error = %err, "failed to drop test schema");
        }
    }
}

/// Creates a fresh schema with the tasks table and a gateway over it.
///
/// # Errors
///
/// Returns an error when the database URL is unset or the schema cannot be
/// created.
pub fn setup_gateway() -> Result<(TestSchema, PostgresTaskGateway), eyre::Report> {
    let url = std::env::var(TEST_DATABASE_URL_ENV)
        .wrap_err_with(|| format!("{TEST_DATABASE_URL_ENV} must be set for PostgreSQL tests"))?;
    let name = format!("taskwith_test_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::establish(&url).wrap_err("connect to test database")?;
    admin
        .batch_execute(&format!("CREATE SCHEMA {name}"))
        .wrap_err("create test schema")?;

    let pool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(name.clone())))
        .build(ConnectionManager::<PgConnection>::new(url))
        .wrap_err("build test pool")?;
    let schema = TestSchema {
        pool: pool.clone(),
        name,
    };
    schema.execute(CREATE_TASKS_SQL)?;
    Ok((schema, PostgresTaskGateway::new(pool)))
}
