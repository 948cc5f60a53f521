//! In-memory session store.
//!
//! Sessions live until they sit idle past the configured timeout or are
//! pushed out by the size cap, least recently used first. Each session sits
//! behind its own async mutex, held for the whole turn (including the
//! completion call), so a session never sees two operations at once while
//! other sessions proceed independently.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

use salescall_types::chat::ChatSession;
use salescall_types::config::ServerConfig;
use salescall_types::error::SessionError;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

/// How long sessions may idle and how many may exist at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub idle_timeout: Duration,
    pub max_sessions: usize,
}

impl SessionLimits {
    pub fn from_config(server: &ServerConfig) -> Self {
        Self {
            idle_timeout: Duration::from_secs(server.session_idle_minutes * 60),
            max_sessions: server.max_sessions.max(1),
        }
    }
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

struct StoredSession {
    handle: SessionHandle,
    last_access: Instant,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, StoredSession>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Create an empty session and return its id.
    ///
    /// Idle sessions are dropped first; if the store is still full the least
    /// recently used sessions make room.
    pub fn create(&self) -> Uuid {
        self.evict_idle();
        while self.sessions.len() >= self.limits.max_sessions {
            if !self.evict_least_recent() {
                break;
            }
        }

        let session = ChatSession::new();
        let id = session.id;
        self.sessions.insert(
            id,
            StoredSession {
                handle: Arc::new(Mutex::new(session)),
                last_access: Instant::now(),
            },
        );
        tracing::debug!(session_id = %id, live = self.sessions.len(), "session created");
        id
    }

    /// Look up a session and mark it as used.
    pub fn get(&self, id: &Uuid) -> Result<SessionHandle, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or(SessionError::NotFound(*id))?;
        entry.last_access = Instant::now();
        Ok(Arc::clone(&entry.handle))
    }

    pub fn remove(&self, id: &Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| ())
            .ok_or(SessionError::NotFound(*id))
    }

    /// Drop every session idle for longer than the timeout. Returns how many went.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let timeout = self.limits.idle_timeout;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| now.duration_since(stored.last_access) <= timeout);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::info!(evicted, live = self.sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.value().last_access)
            .map(|entry| *entry.key());
        match oldest {
            Some(id) => {
                self.sessions.remove(&id);
                tracing::debug!(session_id = %id, "session evicted to make room");
                true
            }
            None => false,
        }
    }

    /// Ids of all live sessions, in no particular order.
    pub fn list_ids(&self) -> Vec<Uuid> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
