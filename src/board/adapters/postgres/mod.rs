//! `PostgreSQL` adapter for the task gateway port.

mod gateway;
mod models;
mod schema;

pub use gateway::{PostgresTaskGateway, TaskPgPool};
