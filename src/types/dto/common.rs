use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{Page, ValidationErrors};

/// Standardized error response body
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable message, suitable for a flash display
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// Location the client should navigate to, when the failure implies one
    /// (login page for missing authentication, site root for denied access)
    pub redirect_to: Option<String>,

    /// Anonymous session token remembering the originally requested page;
    /// present the token at login to be forwarded back there
    pub login_session: Option<String>,
}

/// A single field-level validation message
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FieldErrorObject {
    /// Name of the offending field
    pub field: String,

    /// What is wrong with it
    pub message: String,
}

/// Response body for rejected form submissions
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    /// Summary line, e.g. "The form contains 2 errors."
    pub message: String,

    /// Every field problem found in the submission
    pub errors: Vec<FieldErrorObject>,
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            message: errors.to_string(),
            errors: errors
                .errors
                .into_iter()
                .map(|e| FieldErrorObject {
                    field: e.field,
                    message: e.message,
                })
                .collect(),
        }
    }
}

/// Response model for the health check endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Running service version
    pub version: String,

    /// Current server time (RFC 3339)
    pub timestamp: String,
}

/// Pagination metadata accompanying every windowed listing
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page (1-based)
    pub page: u64,

    /// Window size
    pub per_page: u64,

    /// Total matching items
    pub total_items: u64,

    /// Total pages at this window size
    pub total_pages: u64,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}
