use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::user::UserResponse;

/// Request model for logging in
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address (matched case-insensitively)
    pub email: String,

    /// Password for authentication
    pub password: String,

    /// Issue a long-lived remember token alongside the session
    pub remember_me: Option<bool>,
}

/// Response model for a successful login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token; send as a Bearer credential
    pub session_token: String,

    /// Raw remember token for the client's persistent cookie, when
    /// remember_me was requested; only its digest is stored server-side
    pub remember_token: Option<String>,

    /// Where to go next: the remembered pre-login destination if one exists,
    /// otherwise the user's own profile
    pub redirect_to: String,

    pub user: UserResponse,
}

/// Request model for re-authenticating from a persistent remember token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RememberLoginRequest {
    /// User ID (UUID) the remember token belongs to
    pub user_id: String,

    /// Raw remember token from the persistent cookie
    pub remember_token: String,
}

/// Response model for logout
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Success message
    pub message: String,
}
