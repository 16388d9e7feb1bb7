use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::internal::SessionData;

/// Server-side session state keyed by opaque token
///
/// Injected into the guard functions rather than accessed as an ambient
/// global, so tests can substitute their own instance.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, token: &str) -> Option<SessionData>;
    async fn set(&self, token: &str, data: SessionData);
    async fn clear(&self, token: &str);
}

/// In-memory session store
///
/// Sessions do not survive a process restart; persistent logins go through
/// the remember-token flow instead.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, token: &str) -> Option<SessionData> {
        self.sessions.read().await.get(token).cloned()
    }

    async fn set(&self, token: &str, data: SessionData) {
        self.sessions.write().await.insert(token.to_string(), data);
    }

    async fn clear(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}
