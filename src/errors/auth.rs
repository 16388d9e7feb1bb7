use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::{GuardError, StoreError};
use crate::types::dto::common::ErrorResponse;

/// Session and login error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Email/password combination did not match an account
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Account exists but has not confirmed its activation email
    #[oai(status = 403)]
    AccountNotActivated(Json<ErrorResponse>),

    /// No logged-in session
    #[oai(status = 401)]
    AuthenticationRequired(Json<ErrorResponse>),

    /// Logged in but not allowed to act on this resource
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid email/password combination".to_string(),
            status_code: 401,
            redirect_to: None,
            login_session: None,
        }))
    }

    /// Create an AccountNotActivated error
    pub fn account_not_activated() -> Self {
        AuthError::AccountNotActivated(Json(ErrorResponse {
            error: "account_not_activated".to_string(),
            message: "Account not activated. Check your email for the activation link."
                .to_string(),
            status_code: 403,
            redirect_to: Some("/".to_string()),
            login_session: None,
        }))
    }

    /// Create an AuthenticationRequired error carrying the anonymous
    /// session that remembers the requested page
    pub fn authentication_required(login_session: String) -> Self {
        AuthError::AuthenticationRequired(Json(ErrorResponse {
            error: "authentication_required".to_string(),
            message: "Please log in.".to_string(),
            status_code: 401,
            redirect_to: Some("/login".to_string()),
            login_session: Some(login_session),
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        AuthError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Access denied".to_string(),
            status_code: 403,
            redirect_to: Some("/".to_string()),
            login_session: None,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(what: &str) -> Self {
        AuthError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} not found", what),
            status_code: 404,
            redirect_to: None,
            login_session: None,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
            redirect_to: None,
            login_session: None,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::AccountNotActivated(json) => json.0.message.clone(),
            AuthError::AuthenticationRequired(json) => json.0.message.clone(),
            AuthError::Forbidden(json) => json.0.message.clone(),
            AuthError::NotFound(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<GuardError> for AuthError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::AuthenticationRequired { login_session } => {
                AuthError::authentication_required(login_session)
            }
            GuardError::Forbidden => AuthError::forbidden(),
            GuardError::Internal(message) => AuthError::internal_error(message),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCredentials => AuthError::invalid_credentials(),
            StoreError::NotFound { what } => AuthError::not_found(what),
            other => AuthError::internal_error(other.to_string()),
        }
    }
}
