use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::dto::common::PageMeta;
use crate::types::dto::micropost::MicropostResponse;

/// Request model for account signup
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Display name (at most 50 characters)
    pub name: String,

    /// Email address, unique case-insensitively
    pub email: String,

    /// Password (at least 6 characters)
    pub password: String,

    /// Must match the password
    pub password_confirmation: String,
}

/// Response model for account signup
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Next-step instruction for the new account holder
    pub message: String,

    pub user: UserResponse,
}

/// Request model for confirming an activation token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ActivateRequest {
    /// Email the activation link was sent to
    pub email: String,

    /// Raw activation token from the link
    pub token: String,
}

/// Response model for account activation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ActivateResponse {
    pub message: String,

    pub user: UserResponse,
}

/// Request model for profile updates
///
/// There is deliberately no admin field here: privilege elevation through a
/// self-service update is impossible regardless of the submitted payload.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name, if changing
    pub name: Option<String>,

    /// New email address, if changing
    pub email: Option<String>,

    /// New password, if changing; omit to keep the current one
    pub password: Option<String>,

    /// Must match the password when one is supplied
    pub password_confirmation: Option<String>,
}

/// Response model for profile updates
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub message: String,

    pub user: UserResponse,
}

/// Public representation of a user account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID (UUID)
    pub id: String,

    pub name: String,

    pub email: String,

    /// Whether the account has confirmed its activation email
    pub activated: bool,

    pub admin: bool,

    /// Account creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            activated: user.activated,
            admin: user.admin,
            created_at: user.created_at,
        }
    }
}

/// Paginated listing of users
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,

    pub page: PageMeta,
}

/// Profile page payload: the user, their stats, and one page of their posts
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: UserResponse,

    /// Total microposts authored by this user
    pub micropost_count: u64,

    /// How many users this user follows
    pub following_count: u64,

    /// How many users follow this user
    pub followers_count: u64,

    pub microposts: Vec<MicropostResponse>,

    pub page: PageMeta,
}

/// Response model for account deletion
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
}
