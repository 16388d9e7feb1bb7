// Common test utilities for integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use poem::Request;
use sea_orm::Database;

use microblog_backend::app_data::AppData;
use microblog_backend::config::AppConfig;
use microblog_backend::services::{ActivationMailer, SessionService};
use microblog_backend::stores::{
    MemorySessionStore, MicropostStore, NewUser, RelationshipStore, UserStore,
};
use microblog_backend::types::db::user;

/// One captured activation email
pub struct Delivery {
    pub email: String,
    pub name: String,
    pub token: String,
}

/// Mailer that records deliveries for inspection instead of sending them
#[derive(Default)]
pub struct RecordingMailer {
    pub deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingMailer {
    /// The raw activation token from the most recent delivery to this address
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.deliveries
            .lock()
            .expect("mailer lock poisoned")
            .iter()
            .rev()
            .find(|d| d.email == email)
            .map(|d| d.token.clone())
    }
}

#[async_trait]
impl ActivationMailer for RecordingMailer {
    async fn send_activation_email(&self, email: &str, name: &str, token: &str) {
        self.deliveries
            .lock()
            .expect("mailer lock poisoned")
            .push(Delivery {
                email: email.to_string(),
                name: name.to_string(),
                token: token.to_string(),
            });
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_secret: "test-session-secret-minimum-32-chars".to_string(),
        password_pepper: "test-pepper-for-integration-tests".to_string(),
    }
}

/// Creates a migrated in-memory database wired into AppData, with the
/// activation mailer swapped for a recording one
pub async fn setup_app() -> (Arc<AppData>, Arc<RecordingMailer>) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let config = test_config();
    let mailer = Arc::new(RecordingMailer::default());

    let app_data = AppData {
        user_store: Arc::new(UserStore::new(
            db.clone(),
            config.password_pepper.clone(),
        )),
        micropost_store: Arc::new(MicropostStore::new(db.clone())),
        relationship_store: Arc::new(RelationshipStore::new(db.clone())),
        session_service: Arc::new(SessionService::new(
            Arc::new(MemorySessionStore::new()),
            config.session_secret.clone(),
        )),
        mailer: mailer.clone(),
        db,
    };

    (Arc::new(app_data), mailer)
}

/// Create an account directly through the store and activate it
pub async fn create_activated_user(app: &AppData, name: &str) -> user::Model {
    let created = app
        .user_store
        .create_user(
            NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password: "password".to_string(),
                password_confirmation: "password".to_string(),
            },
            "unused-digest".to_string(),
        )
        .await
        .expect("Failed to create user");

    app.user_store
        .activate(&created.id)
        .await
        .expect("Activation failed")
}

pub fn bare_request(path: &str) -> Request {
    Request::builder()
        .uri(path.parse().expect("valid uri"))
        .finish()
}

pub fn request_with_token(path: &str, token: &str) -> Request {
    Request::builder()
        .uri(path.parse().expect("valid uri"))
        .header("Authorization", format!("Bearer {}", token))
        .finish()
}

/// Log the user in and build a request carrying the session token
pub async fn logged_in_request(app: &AppData, user_id: &str, path: &str) -> Request {
    let token = app.session_service.log_in(user_id).await;
    request_with_token(path, &token)
}
