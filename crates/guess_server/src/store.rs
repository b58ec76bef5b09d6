//! Session storage for game state.

use crate::session::SessionId;
use guess_core::GameState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Typed key-value storage mapping sessions to their game.
///
/// Implementations must apply [`update`](SessionStore::update) atomically
/// per session: two concurrent updates for one session run one after the
/// other, each seeing the other's result.
pub trait SessionStore: Clone + Send + Sync + 'static {
    /// Returns the session's game, if it has one.
    fn get(&self, id: &SessionId) -> Option<GameState>;

    /// Stores `state` as the session's game, replacing any previous one.
    fn put(&self, id: &SessionId, state: GameState);

    /// Forgets the session's game.
    fn clear(&self, id: &SessionId);

    /// Reads, transforms and writes back the session's game as one step.
    ///
    /// `f` receives the current game (or `None`) and returns the game to
    /// store together with a value handed back to the caller.
    fn update<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(Option<GameState>) -> (GameState, R),
    ) -> R;

    /// Number of sessions with a game.
    fn len(&self) -> usize;

    /// True if no session has a game.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Entry {
    state: GameState,
    last_seen: Instant,
}

/// In-process store with optional idle expiry.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Entry>>>,
    ttl: Option<Duration>,
}

impl MemorySessionStore {
    /// Creates a store whose sessions never expire.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Creates a store that forgets sessions idle for longer than `ttl`.
    #[instrument]
    pub fn with_ttl(ttl: Duration) -> Self {
        info!(ttl_secs = ttl.as_secs(), "Creating session store with expiry");
        Self {
            sessions: Arc::default(),
            ttl: Some(ttl),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Entry>> {
        // A panic mid-update leaves the map itself consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(entry.last_seen) <= ttl,
            None => true,
        }
    }

    /// Removes sessions idle for longer than the TTL. Returns how many.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Removes sessions that would be expired at `now`. Returns how many.
    #[instrument(skip(self))]
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry, now));
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Purged expired sessions");
        }
        removed
    }
}

impl SessionStore for MemorySessionStore {
    #[instrument(skip(self), fields(session_id = %id))]
    fn get(&self, id: &SessionId) -> Option<GameState> {
        let now = Instant::now();
        let mut sessions = self.lock();
        match sessions.get(id) {
            Some(entry) if self.is_live(entry, now) => Some(entry.state.clone()),
            Some(_) => {
                debug!("Session expired");
                sessions.remove(id);
                None
            }
            None => {
                debug!("Session not found");
                None
            }
        }
    }

    #[instrument(skip(self, state), fields(session_id = %id))]
    fn put(&self, id: &SessionId, state: GameState) {
        let entry = Entry {
            state,
            last_seen: Instant::now(),
        };
        self.lock().insert(id.clone(), entry);
        debug!("Session stored");
    }

    #[instrument(skip(self), fields(session_id = %id))]
    fn clear(&self, id: &SessionId) {
        if self.lock().remove(id).is_some() {
            debug!("Session cleared");
        }
    }

    #[instrument(skip(self, f), fields(session_id = %id))]
    fn update<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(Option<GameState>) -> (GameState, R),
    ) -> R {
        let now = Instant::now();
        let mut sessions = self.lock();
        let current = sessions
            .get(id)
            .filter(|entry| self.is_live(entry, now))
            .map(|entry| entry.state.clone());

        let (state, result) = f(current);
        sessions.insert(
            id.clone(),
            Entry {
                state,
                last_seen: now,
            },
        );
        result
    }

    fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .values()
            .filter(|entry| self.is_live(entry, now))
            .count()
    }
}
