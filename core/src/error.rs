use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo API.
///
/// These errors cover all failure modes of the service, from request
/// validation to database errors. Each variant maps to an HTTP status code
/// for API responses.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let not_found = TodoError::not_found_id(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let invalid = TodoError::disallowed_field("foo");
/// assert_eq!(invalid.status_code(), 400);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Todo not found by the given identifier
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// Validation error with a caller-facing message
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Create a not found error for a todo ID
    pub fn not_found_id(id: i64) -> Self {
        Self::NotFound(format!("Todo with ID {id} not found"))
    }

    /// Create a validation error for a field outside the allowed set
    pub fn disallowed_field(field: &str) -> Self {
        Self::Validation(format!("Field {field} is not allowed"))
    }

    /// Create a validation error for a missing or empty title
    pub fn title_required() -> Self {
        Self::Validation("Title is required".to_string())
    }

    /// Create a validation error for an attempt to change the id
    pub fn immutable_id() -> Self {
        Self::Validation("Cannot change id".to_string())
    }

    /// Create a validation error for an unparseable timestamp
    pub fn invalid_timestamp(value: &str) -> Self {
        Self::Validation(format!("Invalid timestamp: {value}"))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TodoError::Database(_))
    }

    /// Convert to the appropriate HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::NotFound(_) => 404,
            TodoError::Validation(_) => 400,
            TodoError::Database(_) => 500,
            TodoError::Configuration(_) => 500,
            TodoError::Internal(_) => 500,
        }
    }
}
