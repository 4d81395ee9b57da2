//! Mock implementation of TodoRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Realistic behavior simulation

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use todo_core::{
    NewTodo, Result, Todo, TodoError, TodoFilter, TodoRepository, UpdateTodo,
};

/// Mock implementation of TodoRepository for testing
///
/// Features:
/// - Thread-safe concurrent access
/// - Error injection for failure testing
/// - Call history tracking for verification
pub struct MockTodoRepository {
    todos: Arc<Mutex<HashMap<i64, Todo>>>,
    next_id: Arc<AtomicI64>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            todos: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create mock repository with pre-populated todos
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let mut todo_map = HashMap::new();
        let mut max_id = 0;

        for todo in todos {
            if todo.id > max_id {
                max_id = todo.id;
            }
            todo_map.insert(todo.id, todo);
        }

        Self {
            todos: Arc::new(Mutex::new(todo_map)),
            next_id: Arc::new(AtomicI64::new(max_id + 1)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }

    /// Record method call in history
    fn record_call(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        self.record_call("create", &format!("title={}", todo.title));
        self.check_error_injection()?;

        if todo.title.is_empty() {
            return Err(TodoError::title_required());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();

        let new_todo = Todo {
            id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            deadline_at: todo.deadline_at,
            created_at: now,
            updated_at: now,
        };

        self.todos.lock().insert(id, new_todo.clone());
        Ok(new_todo)
    }

    async fn update(&self, id: i64, changes: UpdateTodo) -> Result<Todo> {
        self.record_call("update", &format!("id={id}"));
        self.check_error_injection()?;

        let mut todos = self.todos.lock();
        let todo = todos
            .get_mut(&id)
            .ok_or_else(|| TodoError::not_found_id(id))?;

        if changes.is_empty() {
            return Ok(todo.clone());
        }

        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(description) = changes.description {
            todo.description = description;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        if let Some(deadline_at) = changes.deadline_at {
            todo.deadline_at = deadline_at;
        }
        todo.updated_at = Utc::now();

        Ok(todo.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>> {
        self.record_call("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.todos.lock().get(&id).cloned())
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        self.record_call("list", "");
        self.check_error_injection()?;

        let todos = self.todos.lock();
        let mut result: Vec<Todo> = todos
            .values()
            .filter(|todo| {
                if let Some(completed) = filter.completed {
                    if todo.completed != completed {
                        return false;
                    }
                }
                if let Some(cutoff) = filter.due_within {
                    if let Some(deadline) = todo.deadline_at {
                        if deadline > cutoff {
                            return false;
                        }
                    }
                }
                true
            })
            .cloned()
            .collect();

        // HashMap iteration order is arbitrary; present the store's natural order
        result.sort_by_key(|todo| todo.id);
        Ok(result)
    }

    async fn delete(&self, id: i64) -> Result<Option<Todo>> {
        self.record_call("delete", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.todos.lock().remove(&id))
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check", "");
        self.check_error_injection()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = MockTodoRepository::new();

        let todo = repo.create(NewTodo::with_title("Buy milk")).await.unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.created_at, todo.updated_at);

        let fetched = repo.get_by_id(todo.id).await.unwrap().unwrap();
        assert_eq!(fetched, todo);
        repo.assert_called("create");
        repo.assert_called("get_by_id");
        assert_eq!(repo.call_history().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_stable() {
        let repo = MockTodoRepository::new();

        let first = repo.create(NewTodo::with_title("a")).await.unwrap();
        let second = repo.create(NewTodo::with_title("b")).await.unwrap();
        assert_ne!(first.id, second.id);

        repo.delete(first.id).await.unwrap();
        let third = repo.create(NewTodo::with_title("c")).await.unwrap();
        // Deleted ids are never reassigned
        assert_ne!(third.id, first.id);
    }

    #[tokio::test]
    async fn test_update_patches_present_fields() {
        let repo = MockTodoRepository::new();
        let todo = repo.create(NewTodo::with_title("Original")).await.unwrap();

        let updated = repo
            .update(
                todo.id,
                UpdateTodo {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Original");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = MockTodoRepository::new();
        let err = repo.update(7, UpdateTodo::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = MockTodoRepository::new();
        let todo = repo.create(NewTodo::with_title("gone soon")).await.unwrap();

        assert!(repo.delete(todo.id).await.unwrap().is_some());
        assert!(repo.delete(todo.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repo = MockTodoRepository::new();
        repo.create(NewTodo {
            title: "done".to_string(),
            description: None,
            completed: true,
            deadline_at: None,
        })
        .await
        .unwrap();
        repo.create(NewTodo {
            title: "due far out".to_string(),
            description: None,
            completed: false,
            deadline_at: Some(Utc::now() + Duration::days(30)),
        })
        .await
        .unwrap();

        let completed = repo
            .list(TodoFilter {
                completed: Some(true),
                due_within: None,
            })
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);

        let due = repo
            .list(TodoFilter {
                completed: None,
                due_within: Some(Utc::now() + Duration::days(7)),
            })
            .await
            .unwrap();
        // Only the todo without a deadline qualifies
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "done");
    }

    #[tokio::test]
    async fn test_error_injection() {
        let repo = MockTodoRepository::new();
        repo.inject_error(TodoError::Database("injected".to_string()));

        let err = repo.create(NewTodo::with_title("x")).await.unwrap_err();
        assert!(err.is_database());

        // Injection is consumed by the failing call
        assert!(repo.create(NewTodo::with_title("x")).await.is_ok());

        repo.inject_error(TodoError::Database("never fires".to_string()));
        repo.clear_error();
        assert!(repo.create(NewTodo::with_title("y")).await.is_ok());
    }
}
