//! In-memory adapter for the task gateway port.

mod gateway;

pub use gateway::{DEFAULT_COLLECTION, InMemoryTaskGateway};
