//! Database crate for the todo API
//!
//! This crate provides the SQLite implementation of the TodoRepository
//! trait, including connection management, embedded migrations, and
//! query building.
//!
//! # Architecture
//!
//! - [`sqlite`] - SQLite repository implementation with connection pooling
//! - [`common`] - Shared row mapping and query-building utilities
//!
//! # Example
//!
//! ```rust,no_run
//! use database::{SqliteTodoRepository, TodoRepository, NewTodo};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = SqliteTodoRepository::new(":memory:").await?;
//! repo.migrate().await?;
//!
//! let todo = repo.create(NewTodo::with_title("Buy milk")).await?;
//! assert_eq!(todo.title, "Buy milk");
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod sqlite;

pub use sqlite::SqliteTodoRepository;

// Re-export core types so integration tests and consumers can use a single import
pub use todo_core::{NewTodo, Todo, TodoError, TodoFilter, TodoRepository, UpdateTodo};
