use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::{GuardError, StoreError};
use crate::types::dto::common::ErrorResponse;

/// Follow relationship error types
#[derive(ApiResponse, Debug)]
pub enum RelationshipError {
    /// No logged-in session
    #[oai(status = 401)]
    AuthenticationRequired(Json<ErrorResponse>),

    /// Logged in but not allowed to act here
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Target user does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl RelationshipError {
    /// Create an AuthenticationRequired error carrying the anonymous
    /// session that remembers the requested page
    pub fn authentication_required(login_session: String) -> Self {
        RelationshipError::AuthenticationRequired(Json(ErrorResponse {
            error: "authentication_required".to_string(),
            message: "Please log in.".to_string(),
            status_code: 401,
            redirect_to: Some("/login".to_string()),
            login_session: Some(login_session),
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        RelationshipError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Access denied".to_string(),
            status_code: 403,
            redirect_to: Some("/".to_string()),
            login_session: None,
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        RelationshipError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
            redirect_to: None,
            login_session: None,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        RelationshipError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
            redirect_to: None,
            login_session: None,
        }))
    }
}

impl fmt::Display for RelationshipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipError::AuthenticationRequired(json) => write!(f, "{}", json.0.message),
            RelationshipError::Forbidden(json) => write!(f, "{}", json.0.message),
            RelationshipError::NotFound(json) => write!(f, "{}", json.0.message),
            RelationshipError::InternalError(json) => write!(f, "{}", json.0.message),
        }
    }
}

impl From<GuardError> for RelationshipError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::AuthenticationRequired { login_session } => {
                RelationshipError::authentication_required(login_session)
            }
            GuardError::Forbidden => RelationshipError::forbidden(),
            GuardError::Internal(message) => RelationshipError::internal_error(message),
        }
    }
}

impl From<StoreError> for RelationshipError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => RelationshipError::not_found(),
            other => RelationshipError::internal_error(other.to_string()),
        }
    }
}
