use sqlx::{sqlite::SqliteRow, Row};
use todo_core::{
    error::TodoError,
    models::{Todo, TodoFilter},
};

/// Column list shared by every query that returns full todo rows
pub const TODO_COLUMNS: &str =
    "id, title, description, completed, deadline_at, created_at, updated_at";

/// Convert a SQLite row to the Todo model
pub fn row_to_todo(row: &SqliteRow) -> Todo {
    Todo {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        completed: row.get("completed"),
        deadline_at: row.get("deadline_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Convert a SQLx error to a TodoError
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> TodoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            TodoError::Database(format!("Database constraint error: {}", db_err.message()))
        }
        sqlx::Error::RowNotFound => {
            // Existence is checked at the application level before queries
            // that expect a row, so this indicates an internal bug.
            TodoError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TodoError::Database("Connection pool timeout".to_string()),
        sqlx::Error::Io(io_err) => TodoError::Database(format!("Database I/O error: {io_err}")),
        _ => TodoError::Database(format!("Database operation failed: {err}")),
    }
}

/// Build the list query for a filter using QueryBuilder with proper type binding.
///
/// Conditions combine with AND. Datetime bounds are bound natively so they
/// compare against stored timestamps in the same encoding. The id ordering
/// makes the store's natural order explicit.
pub fn build_filter_query(filter: &TodoFilter) -> sqlx::QueryBuilder<'static, sqlx::Sqlite> {
    let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
        sqlx::QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos"));

    let mut has_conditions = false;

    if let Some(completed) = filter.completed {
        query_builder.push(" WHERE completed = ");
        query_builder.push_bind(completed);
        has_conditions = true;
    }

    if let Some(due_within) = filter.due_within {
        if has_conditions {
            query_builder.push(" AND ");
        } else {
            query_builder.push(" WHERE ");
        }
        query_builder.push("(deadline_at IS NULL OR deadline_at <= ");
        query_builder.push_bind(due_within);
        query_builder.push(")");
    }

    query_builder.push(" ORDER BY id");

    query_builder
}
