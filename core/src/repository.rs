use crate::{
    error::Result,
    models::{NewTodo, Todo, TodoFilter, UpdateTodo},
};
use async_trait::async_trait;

/// Repository trait for todo persistence and retrieval operations
///
/// This trait defines the interface for all todo data operations.
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Create a new todo
    ///
    /// # Arguments
    /// * `todo` - The new todo data to persist
    ///
    /// # Returns
    /// * `Ok(Todo)` - The created todo with assigned ID and timestamps
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn create(&self, todo: NewTodo) -> Result<Todo>;

    /// Apply a patch to an existing todo
    ///
    /// Only fields present in the patch are changed; `updated_at` is
    /// refreshed whenever at least one field changes. An empty patch
    /// returns the record unchanged.
    ///
    /// # Arguments
    /// * `id` - The todo ID to update
    /// * `changes` - The fields to update
    ///
    /// # Returns
    /// * `Ok(Todo)` - The updated todo
    /// * `Err(TodoError::NotFound)` - If the todo doesn't exist
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn update(&self, id: i64, changes: UpdateTodo) -> Result<Todo>;

    /// Get a todo by its numeric ID
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The todo if found
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>>;

    /// List todos matching the given filter criteria
    ///
    /// Results are returned in stable id order.
    ///
    /// # Returns
    /// * `Ok(Vec<Todo>)` - The matching todos (may be empty)
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>>;

    /// Delete a todo permanently
    ///
    /// Deleting a nonexistent id is not an error.
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The removed todo, captured before deletion
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn delete(&self, id: i64) -> Result<Option<Todo>>;

    /// Get repository health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TodoError::Database)` - Repository is unhealthy
    async fn health_check(&self) -> Result<()>;
}
