//! Builder pattern implementations for easy test data construction

use chrono::{DateTime, Duration, Utc};
use todo_core::models::Todo;

/// Fluent builder for Todo test fixtures
///
/// # Examples
///
/// ```rust
/// use mocks::TodoBuilder;
///
/// let todo = TodoBuilder::new()
///     .id(7)
///     .title("Buy milk")
///     .completed(true)
///     .build();
/// assert_eq!(todo.id, 7);
/// assert!(todo.completed);
/// ```
pub struct TodoBuilder {
    todo: Todo,
}

impl Default for TodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoBuilder {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            todo: Todo {
                id: 1,
                title: "Test todo".to_string(),
                description: None,
                completed: false,
                deadline_at: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.todo.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.todo.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.todo.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.todo.completed = completed;
        self
    }

    pub fn deadline_at(mut self, deadline_at: DateTime<Utc>) -> Self {
        self.todo.deadline_at = Some(deadline_at);
        self
    }

    /// Set the deadline relative to now, in whole days (may be negative)
    pub fn due_in_days(mut self, days: i64) -> Self {
        self.todo.deadline_at = Some(Utc::now() + Duration::days(days));
        self
    }

    pub fn build(self) -> Todo {
        self.todo
    }
}
