//! In-process registry of live game sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tictactoe_engine::GameSession;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Unique identifier for a game session.
pub type SessionId = Uuid;

/// Idle time after which a session is dropped, unless configured otherwise.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct Entry {
    session: GameSession,
    last_touched: Instant,
}

impl Entry {
    fn is_idle(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.last_touched) > ttl
    }
}

/// Manages all game sessions.
///
/// Clones share the same registry. Each session is read and written under
/// the lock, so two requests for one session never interleave. Sessions
/// untouched for longer than the idle TTL are evicted: lazily on lookup, on
/// every create, and by [`spawn_sweeper`](Self::spawn_sweeper).
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, Entry>>>,
    idle_ttl: Duration,
}

impl SessionManager {
    /// Creates a new session manager with [`DEFAULT_IDLE_TTL`].
    #[instrument]
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }

    /// Creates a new session manager that drops sessions idle for `idle_ttl`.
    #[instrument]
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        info!(?idle_ttl, "Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// How long a session may sit untouched.
    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Live entry for `id`, evicting it first if it has gone idle.
    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, Entry>,
        id: &SessionId,
        now: Instant,
    ) -> Option<&'a mut Entry> {
        if sessions.get(id).is_some_and(|e| e.is_idle(self.idle_ttl, now)) {
            sessions.remove(id);
            info!(session_id = %id, "Idle session evicted");
            return None;
        }
        sessions.get_mut(id)
    }

    /// Stores a new session under a fresh id.
    #[instrument(skip(self, session))]
    pub fn create_session(&self, session: GameSession) -> SessionId {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.lock();
        Self::evict_idle(&mut sessions, self.idle_ttl, now);
        sessions.insert(
            id,
            Entry {
                session,
                last_touched: now,
            },
        );
        info!(session_id = %id, live = sessions.len(), "Created new session");
        id
    }

    /// Gets a copy of a session by id. Counts as activity.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &SessionId) -> Option<GameSession> {
        let now = Instant::now();
        let mut sessions = self.lock();
        let Some(entry) = self.live(&mut sessions, id, now) else {
            debug!(session_id = %id, "Session not found");
            return None;
        };
        entry.last_touched = now;
        Some(entry.session.clone())
    }

    /// Runs `f` on a session while holding the lock.
    ///
    /// Returns `None` if the id is unknown or the session has gone idle.
    #[instrument(skip(self, f))]
    pub fn with_session<T>(&self, id: &SessionId, f: impl FnOnce(&mut GameSession) -> T) -> Option<T> {
        let now = Instant::now();
        let mut sessions = self.lock();
        let Some(entry) = self.live(&mut sessions, id, now) else {
            debug!(session_id = %id, "Session not found");
            return None;
        };
        entry.last_touched = now;
        let out = f(&mut entry.session);
        debug!(session_id = %id, "Session updated");
        Some(out)
    }

    /// Drops a session, returning it if it existed.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &SessionId) -> Option<GameSession> {
        let removed = self.lock().remove(id).map(|entry| entry.session);
        if removed.is_some() {
            info!(session_id = %id, "Session ended");
        }
        removed
    }

    fn evict_idle(sessions: &mut HashMap<SessionId, Entry>, ttl: Duration, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(ttl, now));
        before - sessions.len()
    }

    /// Drops every session idle for longer than the TTL. Returns how many.
    #[instrument(skip(self))]
    pub fn sweep_idle(&self) -> usize {
        let mut sessions = self.lock();
        let evicted = Self::evict_idle(&mut sessions, self.idle_ttl, Instant::now());
        if evicted > 0 {
            info!(evicted, live = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    /// Runs [`sweep_idle`](Self::sweep_idle) periodically on the tokio
    /// runtime. Abort the handle to stop it.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let manager = self.clone();
        let period = self
            .idle_ttl
            .clamp(Duration::from_secs(1), Duration::from_secs(60));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                manager.sweep_idle();
            }
        })
    }

    /// Number of sessions held, including idle ones not yet swept.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no session is held.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
