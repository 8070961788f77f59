//! Gateway port over the external document store holding task documents.

use crate::board::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// CRUD contract over the tasks collection.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Returns every task in the collection, in store-defined order.
    ///
    /// Documents that fail validation are skipped rather than failing the
    /// whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::StoreUnavailable`] when the store cannot
    /// be reached.
    async fn list_all(&self) -> TaskGatewayResult<Vec<Task>>;

    /// Writes a new task document and returns the identifier the store
    /// assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::ValidationRejected`] when the store
    /// refuses the document, or [`TaskGatewayError::StoreUnavailable`].
    async fn create(&self, task: &NewTask) -> TaskGatewayResult<TaskId>;

    /// Applies a partial update to one document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the document no longer
    /// exists.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskGatewayResult<()>;

    /// Deletes one document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the document is already
    /// gone. Callers treat that as success.
    async fn delete(&self, id: &TaskId) -> TaskGatewayResult<()>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The store could not be reached or failed internally.
    #[error("task store unavailable: {0}")]
    StoreUnavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The store refused the write.
    #[error("task store rejected the write: {0}")]
    ValidationRejected(String),

    /// The target document does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl TaskGatewayError {
    /// Wraps a transport or backend failure.
    pub fn store_unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::StoreUnavailable(Arc::new(err))
    }
}
