use std::sync::Arc;

use sea_orm::DatabaseConnection;

/// Per-process dependencies handed to every handler.
///
/// The connection is opened at start-up and injected here; tests build their
/// own state around a fresh database.
#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            orm,
            jwt_secret: jwt_secret.into(),
        }
    }
}
