//! HTTP API for the todo service
//!
//! This crate implements the REST surface of the service over any
//! [`todo_core::TodoRepository`] implementation. The repository is
//! injected at construction time, so tests can run the full router
//! against an in-memory store.
//!
//! # Architecture
//!
//! - [`server`] - `ApiServer` router construction and serving
//! - [`handlers`] - per-endpoint request handlers
//! - [`error`] - `TodoError` to HTTP response mapping
//! - [`request_logger`] - per-request logging middleware

pub mod error;
pub mod handlers;
pub mod request_logger;
pub mod server;

pub use error::ApiError;
pub use server::ApiServer;
