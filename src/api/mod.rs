// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod helpers;
pub mod microposts;
pub mod relationships;
pub mod users;

pub use auth::SessionsApi;
pub use health::HealthApi;
pub use microposts::MicropostsApi;
pub use relationships::RelationshipsApi;
pub use users::UsersApi;

/// Fixed window size for every paginated listing
pub(crate) const PER_PAGE: u64 = 30;
