//! Todo Core Library
//!
//! This crate provides the foundational domain models, error taxonomy, and
//! trait interfaces for the todo API. All other crates depend on the types
//! and interfaces defined here.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`models`] - Core domain models (Todo, NewTodo, UpdateTodo, TodoFilter)
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//! - [`payload`] - Request body validation and query-parameter parsing
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use todo_core::models::NewTodo;
//!
//! let body = json!({"title": "Buy milk", "deadline_at": "2023-02-27T00:00:00"});
//! let draft = NewTodo::from_payload(body.as_object().unwrap()).unwrap();
//! assert_eq!(draft.title, "Buy milk");
//! ```

pub mod error;
pub mod models;
pub mod payload;
pub mod repository;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TodoError};
pub use models::{NewTodo, Todo, TodoFilter, UpdateTodo};
pub use payload::{parse_completed_param, parse_timestamp, window_cutoff, ALLOWED_FIELDS};
pub use repository::TodoRepository;
