//! HTTP server for the todo API
//!
//! Builds the `/api/v1` router over an injected repository and serves it
//! with axum.

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use todo_core::TodoRepository;
use tracing::info;

use crate::handlers::{self, ApiState};

/// Todo API server, generic over the backing repository
pub struct ApiServer<R> {
    state: Arc<ApiState<R>>,
}

impl<R: TodoRepository + Send + Sync + 'static> ApiServer<R> {
    /// Create a new API server over the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            state: Arc::new(ApiState { repository }),
        }
    }

    /// Start the API server on the given address
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.create_router();

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        info!("Starting todo API server on {}", socket_addr);

        let listener = tokio::net::TcpListener::bind(socket_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Create the router with all endpoints
    pub fn create_router(self) -> Router {
        let api = Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/todos",
                get(handlers::list_todos::<R>).post(handlers::create_todo::<R>),
            )
            .route(
                "/todos/:id",
                get(handlers::get_todo::<R>)
                    .put(handlers::update_todo::<R>)
                    .delete(handlers::delete_todo::<R>),
            )
            .with_state(self.state);

        Router::new().nest("/api/v1", api).layer(middleware::from_fn(
            crate::request_logger::request_logging_middleware,
        ))
    }
}
