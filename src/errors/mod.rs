// Two layers: store/guard errors are internal (thiserror) and never leave
// the service layer; API error enums map them to HTTP responses.
pub mod auth;
pub mod guard;
pub mod micropost;
pub mod relationship;
pub mod store;
pub mod user;

pub use auth::AuthError;
pub use guard::GuardError;
pub use micropost::MicropostError;
pub use relationship::RelationshipError;
pub use store::StoreError;
pub use user::UserError;
