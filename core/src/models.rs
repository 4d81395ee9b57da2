use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record.
///
/// Each todo has a unique numeric ID assigned by the store on creation,
/// a required title, and an optional free-form description and deadline.
/// `created_at` and `updated_at` are maintained by the store.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::Todo;
/// use chrono::Utc;
///
/// let todo = Todo {
///     id: 1,
///     title: "Buy milk".to_string(),
///     description: None,
///     completed: false,
///     deadline_at: None,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// assert!(!todo.completed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    /// Auto-increment primary key
    pub id: i64,
    /// Short task title, never empty after creation
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// Optional deadline; absent means "no deadline"
    pub deadline_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data transfer object for creating new todos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTodo {
    /// Required task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Completion flag, defaults to false
    #[serde(default)]
    pub completed: bool,
    /// Optional deadline
    pub deadline_at: Option<DateTime<Utc>>,
}

impl NewTodo {
    /// Create a NewTodo with just a title, everything else defaulted
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            deadline_at: None,
        }
    }
}

/// Data transfer object for updating existing todos.
///
/// The outer `Option` distinguishes "key absent, leave unchanged" from
/// "key present, apply this value". For the clearable fields the inner
/// `Option` carries "explicitly null, clear the field".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdateTodo {
    /// Optional new title (present replaces, including an empty string)
    pub title: Option<String>,
    /// Optional new description; `Some(None)` clears it
    pub description: Option<Option<String>>,
    /// Optional new completion flag
    pub completed: Option<bool>,
    /// Optional new deadline; `Some(None)` clears it
    pub deadline_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateTodo {
    /// True when no field is present, i.e. the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.deadline_at.is_none()
    }
}

/// Filter criteria for listing todos.
///
/// All fields are optional; when multiple are specified they are combined
/// with AND logic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoFilter {
    /// Filter by completion flag
    pub completed: Option<bool>,

    /// Keep todos with no deadline or a deadline at or before this cutoff
    pub due_within: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_update_todo_is_empty() {
        assert!(UpdateTodo::default().is_empty());

        let patch = UpdateTodo {
            completed: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        // An explicit null still counts as a present field
        let patch = UpdateTodo {
            deadline_at: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_todo_json_shape() {
        let todo = Todo {
            id: 1,
            title: "Watch lecture".to_string(),
            description: None,
            completed: true,
            deadline_at: Some(Utc.with_ymd_and_hms(2023, 2, 27, 0, 0, 0).unwrap()),
            created_at: Utc.with_ymd_and_hms(2023, 2, 20, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 2, 20, 0, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "Watch lecture");
        assert!(value["description"].is_null());
        assert_eq!(value["completed"], true);
        assert_eq!(value["deadline_at"], "2023-02-27T00:00:00Z");
        assert_eq!(value["created_at"], "2023-02-20T00:00:00Z");
    }

    #[test]
    fn test_new_todo_with_title() {
        let draft = NewTodo::with_title("Buy milk");
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, None);
        assert!(!draft.completed);
        assert!(draft.deadline_at.is_none());
    }
}
