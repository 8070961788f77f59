//! In-memory document collection for tests and throwaway sessions.
//!
//! Documents are kept as raw JSON objects, the way a document store holds
//! them, so tests can seed drifted data and inspect exactly what was written.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::board::{
    domain::{NewTask, Task, TaskDocument, TaskId, TaskPatch, decode_documents},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};

/// Collection name used when none is configured.
pub const DEFAULT_COLLECTION: &str = "tasks";

/// Thread-safe in-memory task gateway.
///
/// Clones share the same collection.
#[derive(Debug, Clone)]
pub struct InMemoryTaskGateway {
    collection: Arc<str>,
    state: Arc<RwLock<InMemoryCollection>>,
}

#[derive(Debug, Default)]
struct InMemoryCollection {
    documents: Vec<(TaskId, Map<String, Value>)>,
    fail_next_list: bool,
    reject_next_write: Option<String>,
}

impl InMemoryCollection {
    fn position(&self, id: &TaskId) -> Option<usize> {
        self.documents
            .iter()
            .position(|(stored_id, _)| stored_id == id)
    }

    fn take_rejection(&mut self) -> TaskGatewayResult<()> {
        match self.reject_next_write.take() {
            Some(reason) => Err(TaskGatewayError::ValidationRejected(reason)),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryTaskGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskGateway {
    /// Creates an empty `tasks` collection.
    #[must_use]
    pub fn new() -> Self {
        Self::with_collection(DEFAULT_COLLECTION)
    }

    /// Creates an empty collection with the given name.
    #[must_use]
    pub fn with_collection(name: &str) -> Self {
        Self {
            collection: Arc::from(name),
            state: Arc::default(),
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Stores a raw document as another client would, bypassing validation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::ValidationRejected`] when the value is not
    /// a JSON object.
    pub fn insert_document(&self, document: Value) -> TaskGatewayResult<TaskId> {
        let Value::Object(fields) = document else {
            return Err(TaskGatewayError::ValidationRejected(
                "document must be a JSON object".to_owned(),
            ));
        };
        let id = TaskId::generate();
        self.write()?.documents.push((id.clone(), fields));
        Ok(id)
    }

    /// Returns the raw document stored under `id`.
    #[must_use]
    pub fn document(&self, id: &TaskId) -> Option<Value> {
        let state = self.read().ok()?;
        state
            .documents
            .iter()
            .find(|(stored_id, _)| stored_id == id)
            .map(|(_, fields)| Value::Object(fields.clone()))
    }

    /// Returns the number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().map_or(0, |state| state.documents.len())
    }

    /// Returns `true` when the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes the next `list_all` call fail as if the store were unreachable.
    pub fn fail_next_list(&self) {
        if let Ok(mut state) = self.write() {
            state.fail_next_list = true;
        }
    }

    /// Makes the next `create` or `update` call fail with a rejection.
    pub fn reject_next_write(&self, reason: impl Into<String>) {
        if let Ok(mut state) = self.write() {
            state.reject_next_write = Some(reason.into());
        }
    }

    fn read(&self) -> TaskGatewayResult<RwLockReadGuard<'_, InMemoryCollection>> {
        self.state
            .read()
            .map_err(|err| TaskGatewayError::store_unavailable(io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskGatewayResult<RwLockWriteGuard<'_, InMemoryCollection>> {
        self.state
            .write()
            .map_err(|err| TaskGatewayError::store_unavailable(io::Error::other(err.to_string())))
    }
}

/// Writes the patched fields into a stored document, leaving others alone.
fn patch_fields(fields: &mut Map<String, Value>, patch: &TaskPatch) {
    if let Some(title) = patch.title() {
        fields.insert("title".to_owned(), Value::from(title.as_str()));
    }
    match patch.message() {
        Some(Some(message)) => {
            fields.insert("message".to_owned(), Value::from(message));
        }
        Some(None) => {
            fields.remove("message");
        }
        None => {}
    }
    if let Some(status) = patch.status() {
        fields.insert("status".to_owned(), Value::from(status.as_str()));
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_all(&self) -> TaskGatewayResult<Vec<Task>> {
        let snapshot = {
            let mut state = self.write()?;
            if std::mem::take(&mut state.fail_next_list) {
                return Err(TaskGatewayError::store_unavailable(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "collection is unreachable",
                )));
            }
            state.documents.clone()
        };

        let documents = snapshot.into_iter().filter_map(|(id, fields)| {
            match serde_json::from_value::<TaskDocument>(Value::Object(fields)) {
                Ok(document) => Some((id, document)),
                Err(err) => {
                    warn!(task_id = %id, error = %err, "skipping malformed document");
                    None
                }
            }
        });
        Ok(decode_documents(documents))
    }

    async fn create(&self, task: &NewTask) -> TaskGatewayResult<TaskId> {
        let document = serde_json::to_value(TaskDocument::from_new_task(task))
            .map_err(TaskGatewayError::store_unavailable)?;
        let Value::Object(fields) = document else {
            return Err(TaskGatewayError::ValidationRejected(
                "document must be a JSON object".to_owned(),
            ));
        };

        let mut state = self.write()?;
        state.take_rejection()?;
        let id = TaskId::generate();
        state.documents.push((id.clone(), fields));
        debug!(collection = %self.collection, task_id = %id, "document created");
        Ok(id)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskGatewayResult<()> {
        patch
            .ensure_not_empty()
            .map_err(|err| TaskGatewayError::ValidationRejected(err.to_string()))?;
        let mut state = self.write()?;
        let index = state
            .position(id)
            .ok_or_else(|| TaskGatewayError::NotFound(id.clone()))?;
        state.take_rejection()?;
        if let Some((_, fields)) = state.documents.get_mut(index) {
            patch_fields(fields, patch);
        }
        debug!(collection = %self.collection, task_id = %id, "document updated");
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> TaskGatewayResult<()> {
        let mut state = self.write()?;
        let index = state
            .position(id)
            .ok_or_else(|| TaskGatewayError::NotFound(id.clone()))?;
        state.documents.remove(index);
        debug!(collection = %self.collection, task_id = %id, "document deleted");
        Ok(())
    }
}
