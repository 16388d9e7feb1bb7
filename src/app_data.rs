use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::{ActivationMailer, LogMailer, SessionService};
use crate::stores::{MemorySessionStore, MicropostStore, RelationshipStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once and shared across the API handlers,
/// so every endpoint sees the same stores and session state.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub micropost_store: Arc<MicropostStore>,
    pub relationship_store: Arc<RelationshipStore>,
    pub session_service: Arc<SessionService>,
    pub mailer: Arc<dyn ActivationMailer>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        tracing::debug!("Creating stores...");

        let user_store = Arc::new(UserStore::new(
            db.clone(),
            config.password_pepper.clone(),
        ));
        let micropost_store = Arc::new(MicropostStore::new(db.clone()));
        let relationship_store = Arc::new(RelationshipStore::new(db.clone()));

        let session_service = Arc::new(SessionService::new(
            Arc::new(MemorySessionStore::new()),
            config.session_secret.clone(),
        ));

        let mailer: Arc<dyn ActivationMailer> = Arc::new(LogMailer);

        tracing::debug!("Stores created");

        Self {
            db,
            user_store,
            micropost_store,
            relationship_store,
            session_service,
            mailer,
        }
    }
}
