/// Server-side state bound to one opaque session token
///
/// A session may exist before login: guards create an anonymous session to
/// remember the originally requested location, and the login operation
/// consumes it for the post-login redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    /// The logged-in user, if any
    pub user_id: Option<String>,

    /// Location to return to after the next successful login
    pub forwarding_url: Option<String>,
}

impl SessionData {
    /// Session bound to a logged-in user
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            forwarding_url: None,
        }
    }

    /// Anonymous session that only remembers where the client was headed
    pub fn anonymous(forwarding_url: &str) -> Self {
        Self {
            user_id: None,
            forwarding_url: Some(forwarding_url.to_string()),
        }
    }
}
