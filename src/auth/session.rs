use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct SessionEntry {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Registry of live login sessions keyed by session id
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, username: &str, expires_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        // Drop whatever has expired while we hold the lock anyway
        let now = Utc::now();
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            id,
            SessionEntry {
                username: username.to_string(),
                expires_at,
            },
        );
        id
    }

    /// True when the session exists, belongs to `username` and has not expired
    pub async fn is_live(&self, id: &Uuid, username: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .map(|entry| entry.username == username && entry.expires_at > Utc::now())
            .unwrap_or(false)
    }

    /// Returns whether a session was removed
    pub async fn close(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn active_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }
}
