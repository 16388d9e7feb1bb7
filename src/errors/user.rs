use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::{GuardError, StoreError};
use crate::types::dto::common::{ErrorResponse, ValidationErrorResponse};
use crate::types::internal::ValidationErrors;

/// User management error types
#[derive(ApiResponse, Debug)]
pub enum UserError {
    /// Submitted fields failed model validation
    #[oai(status = 422)]
    ValidationFailed(Json<ValidationErrorResponse>),

    /// No logged-in session
    #[oai(status = 401)]
    AuthenticationRequired(Json<ErrorResponse>),

    /// Logged in but not allowed to act on this resource
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// User does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl UserError {
    /// Create a ValidationFailed error from the collected field errors
    pub fn validation_failed(errors: ValidationErrors) -> Self {
        UserError::ValidationFailed(Json(errors.into()))
    }

    /// Create an AuthenticationRequired error carrying the anonymous
    /// session that remembers the requested page
    pub fn authentication_required(login_session: String) -> Self {
        UserError::AuthenticationRequired(Json(ErrorResponse {
            error: "authentication_required".to_string(),
            message: "Please log in.".to_string(),
            status_code: 401,
            redirect_to: Some("/login".to_string()),
            login_session: Some(login_session),
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        UserError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Access denied".to_string(),
            status_code: 403,
            redirect_to: Some("/".to_string()),
            login_session: None,
        }))
    }

    /// Create a Forbidden error with a specific flash message
    pub fn forbidden_with(message: &str) -> Self {
        UserError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.to_string(),
            status_code: 403,
            redirect_to: Some("/".to_string()),
            login_session: None,
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        UserError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
            redirect_to: None,
            login_session: None,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        UserError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
            redirect_to: None,
            login_session: None,
        }))
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::ValidationFailed(json) => write!(f, "{}", json.0.message),
            UserError::AuthenticationRequired(json) => write!(f, "{}", json.0.message),
            UserError::Forbidden(json) => write!(f, "{}", json.0.message),
            UserError::NotFound(json) => write!(f, "{}", json.0.message),
            UserError::InternalError(json) => write!(f, "{}", json.0.message),
        }
    }
}

impl From<GuardError> for UserError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::AuthenticationRequired { login_session } => {
                UserError::authentication_required(login_session)
            }
            GuardError::Forbidden => UserError::forbidden(),
            GuardError::Internal(message) => UserError::internal_error(message),
        }
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => UserError::validation_failed(errors),
            StoreError::NotFound { .. } => UserError::not_found(),
            other => UserError::internal_error(other.to_string()),
        }
    }
}
