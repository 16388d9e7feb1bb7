use std::fmt;
use std::sync::Arc;

use crate::services::crypto;
use crate::stores::SessionStore;
use crate::types::internal::SessionData;

/// Manages login sessions and persistent remember tokens
///
/// Session tokens are opaque handles into the injected `SessionStore`.
/// Remember and activation tokens are never stored raw: only their
/// HMAC-SHA256 digest (keyed by the session secret) is persisted.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    session_secret: String,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, session_secret: String) -> Self {
        Self {
            store,
            session_secret,
        }
    }

    /// Bind a fresh session token to the given user
    pub async fn log_in(&self, user_id: &str) -> String {
        let token = crypto::generate_token();
        self.store.set(&token, SessionData::for_user(user_id)).await;
        token
    }

    /// Resolve the logged-in user for a session token, if any
    pub async fn current_user_id(&self, token: &str) -> Option<String> {
        self.store.get(token).await.and_then(|data| data.user_id)
    }

    /// Clear session state for the token; a no-op for dead sessions
    pub async fn log_out(&self, token: &str) {
        self.store.clear(token).await;
    }

    /// Create an anonymous session remembering the requested location
    ///
    /// The returned token is handed to the client with the login redirect;
    /// presenting it at login forwards the user back to the stored path.
    pub async fn remember_location(&self, requested_path: &str) -> String {
        let token = crypto::generate_token();
        self.store
            .set(&token, SessionData::anonymous(requested_path))
            .await;
        token
    }

    /// Store the requested location on an existing session
    pub async fn store_location(&self, token: &str, requested_path: &str) {
        let mut data = self.store.get(token).await.unwrap_or_default();
        data.forwarding_url = Some(requested_path.to_string());
        self.store.set(token, data).await;
    }

    /// Consume a pre-login session: return its forwarding location and
    /// discard the session entry
    ///
    /// Login always issues a fresh token, so the presented one is dead
    /// after this either way.
    pub async fn take_forwarding_url(&self, token: &str) -> Option<String> {
        let data = self.store.get(token).await;
        self.store.clear(token).await;
        data.and_then(|d| d.forwarding_url)
    }

    /// Generate a raw remember token for the client's persistent cookie
    pub fn new_remember_token(&self) -> String {
        crypto::generate_token()
    }

    /// Digest for server-side storage of a remember or activation token
    pub fn digest(&self, raw_token: &str) -> String {
        crypto::hmac_sha256_token(&self.session_secret, raw_token)
    }

    /// Whether the raw token matches the stored digest
    ///
    /// Returns false, never an error, when no digest is stored.
    pub fn authenticated(&self, digest: Option<&str>, raw_token: &str) -> bool {
        match digest {
            Some(digest) => self.digest(raw_token) == digest,
            None => false,
        }
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("store", &"<session store>")
            .field("session_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemorySessionStore;

    fn service() -> SessionService {
        SessionService::new(
            Arc::new(MemorySessionStore::new()),
            "test-session-secret-minimum-32-chars".to_string(),
        )
    }

    #[tokio::test]
    async fn test_log_in_binds_token_to_user() {
        let service = service();

        let token = service.log_in("user-1").await;

        assert_eq!(
            service.current_user_id(&token).await.as_deref(),
            Some("user-1")
        );
    }

    #[tokio::test]
    async fn test_log_out_clears_session() {
        let service = service();

        let token = service.log_in("user-1").await;
        service.log_out(&token).await;

        assert!(service.current_user_id(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_has_no_current_user() {
        let service = service();
        assert!(service.current_user_id("bogus").await.is_none());
    }

    #[tokio::test]
    async fn test_remembered_location_is_returned_once() {
        let service = service();

        let token = service.remember_location("/users/42/edit").await;

        assert_eq!(
            service.take_forwarding_url(&token).await.as_deref(),
            Some("/users/42/edit")
        );

        // Consumed: the anonymous session is gone
        assert!(service.take_forwarding_url(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_anonymous_session_has_no_current_user() {
        let service = service();

        let token = service.remember_location("/users").await;

        assert!(service.current_user_id(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_authenticated_matches_own_digest() {
        let service = service();

        let raw = service.new_remember_token();
        let digest = service.digest(&raw);

        assert!(service.authenticated(Some(&digest), &raw));
    }

    #[tokio::test]
    async fn test_authenticated_rejects_wrong_token() {
        let service = service();

        let digest = service.digest(&service.new_remember_token());

        assert!(!service.authenticated(Some(&digest), "not-the-token"));
    }

    #[test]
    fn test_authenticated_is_false_without_digest() {
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            "test-session-secret-minimum-32-chars".to_string(),
        );

        // No digest stored: false, never an error
        assert!(!service.authenticated(None, ""));
        assert!(!service.authenticated(None, "anything"));
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let service = SessionService::new(
            Arc::new(MemorySessionStore::new()),
            "super-secret-session-key".to_string(),
        );

        let debug_output = format!("{:?}", service);

        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains("super-secret-session-key"));
    }
}
