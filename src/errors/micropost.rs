use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::{GuardError, StoreError};
use crate::types::dto::common::{ErrorResponse, ValidationErrorResponse};
use crate::types::internal::ValidationErrors;

/// Micropost error types
#[derive(ApiResponse, Debug)]
pub enum MicropostError {
    /// Content failed validation
    #[oai(status = 422)]
    ValidationFailed(Json<ValidationErrorResponse>),

    /// No logged-in session
    #[oai(status = 401)]
    AuthenticationRequired(Json<ErrorResponse>),

    /// Logged in but not the owner of this micropost
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Micropost does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl MicropostError {
    /// Create a ValidationFailed error from the collected field errors
    pub fn validation_failed(errors: ValidationErrors) -> Self {
        MicropostError::ValidationFailed(Json(errors.into()))
    }

    /// Create an AuthenticationRequired error carrying the anonymous
    /// session that remembers the requested page
    pub fn authentication_required(login_session: String) -> Self {
        MicropostError::AuthenticationRequired(Json(ErrorResponse {
            error: "authentication_required".to_string(),
            message: "Please log in.".to_string(),
            status_code: 401,
            redirect_to: Some("/login".to_string()),
            login_session: Some(login_session),
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        MicropostError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "Access denied".to_string(),
            status_code: 403,
            redirect_to: Some("/".to_string()),
            login_session: None,
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        MicropostError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "Micropost not found".to_string(),
            status_code: 404,
            redirect_to: None,
            login_session: None,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        MicropostError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
            redirect_to: None,
            login_session: None,
        }))
    }
}

impl fmt::Display for MicropostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicropostError::ValidationFailed(json) => write!(f, "{}", json.0.message),
            MicropostError::AuthenticationRequired(json) => write!(f, "{}", json.0.message),
            MicropostError::Forbidden(json) => write!(f, "{}", json.0.message),
            MicropostError::NotFound(json) => write!(f, "{}", json.0.message),
            MicropostError::InternalError(json) => write!(f, "{}", json.0.message),
        }
    }
}

impl From<GuardError> for MicropostError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::AuthenticationRequired { login_session } => {
                MicropostError::authentication_required(login_session)
            }
            GuardError::Forbidden => MicropostError::forbidden(),
            GuardError::Internal(message) => MicropostError::internal_error(message),
        }
    }
}

impl From<StoreError> for MicropostError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => MicropostError::validation_failed(errors),
            StoreError::NotFound { .. } => MicropostError::not_found(),
            other => MicropostError::internal_error(other.to_string()),
        }
    }
}
