use shared::{CreateTodoRequest, Todo, UpdateTodoRequest};

use crate::api::{ApiClient, ApiError};

/// The four task operations, each a one-to-one mapping onto an HTTP call.
/// Validation belongs to the caller and error handling to the view; this
/// layer only unwraps (or discards) response bodies.
#[derive(Debug, Clone)]
pub struct TodoService {
    api: ApiClient,
}

impl TodoService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        self.api.get_json("/tasks").await
    }

    /// Returns the id the server assigned to the new todo.
    pub async fn create(&self, request: &CreateTodoRequest) -> Result<i64, ApiError> {
        self.api.post_json("/tasks", request).await
    }

    pub async fn update(&self, id: i64, request: &UpdateTodoRequest) -> Result<(), ApiError> {
        self.api.put_json(&format!("/tasks/{}", id), request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("/tasks/{}", id)).await
    }
}
