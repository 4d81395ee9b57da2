use crate::common::{
    build_filter_query, row_to_todo, sqlx_error_to_todo_error, TODO_COLUMNS,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo, TodoFilter, UpdateTodo},
    repository::TodoRepository,
};

/// SQLite implementation of the TodoRepository trait
///
/// Provides todo persistence using SQLite with connection pooling,
/// prepared statements, and embedded migrations.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (file path or `:memory:`)
    ///
    /// # Returns
    /// * `Ok(SqliteTodoRepository)` - Successfully connected repository
    /// * `Err(TodoError::Database)` - If connection fails
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTodoRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTodoRepository::new("sqlite:///tmp/todos.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        // Handle different database URL formats
        let db_url = if database_url.starts_with(":memory:") || database_url.starts_with("sqlite://")
        {
            database_url.to_string()
        } else {
            format!("sqlite://{database_url}")
        };

        // Create database if it doesn't exist (for file-based databases)
        if !db_url.contains(":memory:") && !Sqlite::database_exists(&db_url).await.unwrap_or(false)
        {
            match Sqlite::create_database(&db_url).await {
                Ok(_) => tracing::info!("Database created successfully"),
                Err(error) => {
                    tracing::error!("Error creating database: {}", error);
                    return Err(TodoError::Database(format!(
                        "Failed to create database: {error}"
                    )));
                }
            }
        }

        let connect_options = if db_url.contains(":memory:") {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(&db_url)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Memory)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true)
        } else {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(db_url.replace("sqlite://", ""))
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true)
        };

        let pool = SqlitePool::connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// Applies all pending migrations to bring the schema up to date. It
    /// should be called after creating a new repository instance.
    ///
    /// # Returns
    /// * `Ok(())` - Migrations completed successfully
    /// * `Err(TodoError::Database)` - If migration fails
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// Primarily intended for testing scenarios where direct SQL execution
    /// is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        // The HTTP layer validates the title; this guards direct callers.
        if todo.title.is_empty() {
            return Err(TodoError::title_required());
        }

        let now = Utc::now();

        let row = sqlx::query(&format!(
            "INSERT INTO todos (title, description, completed, deadline_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.deadline_at)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        Ok(row_to_todo(&row))
    }

    async fn update(&self, id: i64, changes: UpdateTodo) -> Result<Todo> {
        let existing = match self.get_by_id(id).await? {
            Some(todo) => todo,
            None => return Err(TodoError::not_found_id(id)),
        };

        // Nothing to apply, return the record unchanged
        if changes.is_empty() {
            return Ok(existing);
        }

        // Build dynamic update query using QueryBuilder with proper type binding
        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE todos SET ");

        let mut has_updates = false;

        if let Some(title) = changes.title {
            query_builder.push("title = ");
            query_builder.push_bind(title);
            has_updates = true;
        }

        if let Some(description) = changes.description {
            if has_updates {
                query_builder.push(", ");
            }
            query_builder.push("description = ");
            query_builder.push_bind(description);
            has_updates = true;
        }

        if let Some(completed) = changes.completed {
            if has_updates {
                query_builder.push(", ");
            }
            query_builder.push("completed = ");
            query_builder.push_bind(completed);
            has_updates = true;
        }

        if let Some(deadline_at) = changes.deadline_at {
            if has_updates {
                query_builder.push(", ");
            }
            query_builder.push("deadline_at = ");
            query_builder.push_bind(deadline_at);
        }

        query_builder.push(", updated_at = ");
        query_builder.push_bind(Utc::now());

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(format!(" RETURNING {TODO_COLUMNS}"));

        let row = query_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(row_to_todo(&row))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>> {
        let result = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(result.map(|row| row_to_todo(&row)))
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        let mut query = build_filter_query(&filter);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(rows.iter().map(row_to_todo).collect())
    }

    async fn delete(&self, id: i64) -> Result<Option<Todo>> {
        // Capture the representation before removal
        let existing = match self.get_by_id(id).await? {
            Some(todo) => todo,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(Some(existing))
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;
        Ok(())
    }
}
