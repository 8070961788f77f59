//! Port contracts for the task board.
//!
//! Ports define store-agnostic interfaces used by board services.

pub mod gateway;

pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult};
