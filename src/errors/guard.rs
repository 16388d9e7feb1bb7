use thiserror::Error;

/// Outcome of a failed authorization guard
///
/// Guards check authentication before authorization, so a missing or dead
/// session always surfaces as AuthenticationRequired even on admin-only
/// routes. Each API error enum converts this into its own response shape.
#[derive(Error, Debug)]
pub enum GuardError {
    /// No logged-in session; the anonymous session token remembers the
    /// originally requested page for the post-login redirect
    #[error("authentication required")]
    AuthenticationRequired { login_session: String },

    /// Logged in, but not the resource owner or not an admin
    #[error("access denied")]
    Forbidden,

    #[error("internal error: {0}")]
    Internal(String),
}
