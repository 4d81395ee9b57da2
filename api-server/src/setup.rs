use anyhow::{Context, Result};
use database::{SqliteTodoRepository, TodoRepository};
use http_api::ApiServer;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Create a todo repository based on the complete configuration
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTodoRepository>> {
    info!("Creating todo repository");

    // Get validated database URL from config (already handles defaults and validation)
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let repo = SqliteTodoRepository::new(&database_url)
        .await
        .context("Failed to create SQLite repository")?;

    // Run database migrations
    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    // Probe connectivity before the server starts taking requests
    repo.health_check()
        .await
        .context("Repository health check failed")?;

    info!("Todo repository created successfully");
    Ok(Arc::new(repo))
}

/// Create and configure the API server
pub fn create_server(repository: Arc<SqliteTodoRepository>) -> ApiServer<SqliteTodoRepository> {
    info!("Creating API server");
    ApiServer::new(repository)
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<ApiServer<SqliteTodoRepository>> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository);

    info!("Application initialized successfully");
    Ok(server)
}

/// Ensure the database directory exists using config
pub fn ensure_database_directory_from_config(config: &Config) -> Result<()> {
    let database_url = config.database_url();
    ensure_database_directory(&database_url)
}

/// Ensure the database directory exists and set secure permissions
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if let Some(db_path) = database_url.strip_prefix("sqlite://") {
        let db_path = Path::new(db_path);

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                info!("Creating database directory: {}", parent.display());
                std::fs::create_dir_all(parent).context("Failed to create database directory")?;

                // Owner-only access on Unix systems
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let permissions = std::fs::Permissions::from_mode(0o700);
                    std::fs::set_permissions(parent, permissions)
                        .context("Failed to set directory permissions")?;
                }
            }
        }

        // Owner-only access on the database file if it exists
        if db_path.exists() {
            set_secure_file_permissions(db_path)?;
        }
    }
    Ok(())
}

/// Set secure file permissions (owner-only access on Unix)
fn set_secure_file_permissions(file_path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file_path, permissions)
            .with_context(|| format!("Failed to set permissions for {}", file_path.display()))?;
        info!(
            "Set secure permissions (0600) for database file: {}",
            file_path.display()
        );
    }

    #[cfg(windows)]
    {
        // On Windows, we rely on NTFS permissions set by the parent directory
        info!(
            "Database file permissions managed by system on Windows: {}",
            file_path.display()
        );
    }

    Ok(())
}
