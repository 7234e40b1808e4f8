use std::sync::Arc;

use echotasks_notify::Notifier;

use crate::config::ServerConfig;
use crate::files::FileStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: echotasks_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Notification fan-out (in-app rows + optional email).
    pub notifier: Arc<Notifier>,
    /// File store client. `None` when `FILE_STORE_URL` is not configured;
    /// upload endpoints return 500 in that case.
    pub files: Option<Arc<FileStore>>,
}
