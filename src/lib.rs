//! Taskwith: a kanban-style task board over an external document store.
//!
//! Tasks carry a title, message, due date, status, and priority, and are
//! shown in three status columns: To Do, In Progress, and Completed.
//!
//! # Architecture
//!
//! Taskwith follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task types and document validation
//! - **Ports**: The gateway trait over the document store
//! - **Adapters**: In-memory and `PostgreSQL` gateways
//! - **Services**: Task list store, card controller, and creation form
//!
//! # Modules
//!
//! - [`board`]: The task board itself
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Log output setup

pub mod board;
pub mod config;
pub mod telemetry;
