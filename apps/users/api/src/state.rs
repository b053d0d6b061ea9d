//! Application state management.
//!
//! The state is cloned into every router that needs it; the SeaORM
//! connection is a pool handle, so clones share connections.

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
