//! Game service: store, engine and target source working together.

use crate::session::SessionId;
use crate::store::SessionStore;
use derive_getters::Getters;
use derive_new::new;
use guess_core::{Clue, ClueUnavailable, GameEngine, GameState, Outcome, TargetSource, clue_for};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, instrument};

/// What one request did, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Turn {
    /// Outcome kind.
    outcome: Outcome,
    /// Feedback text.
    message: String,
    /// Game after the request.
    state: GameState,
}

impl Turn {
    /// Client-safe view of the game after this turn.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }
}

/// Client-safe view of a game. The target stays hidden until it is won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Counted guesses.
    pub attempts: u32,
    /// Lower end of the bracket.
    pub low: u32,
    /// Upper end of the bracket.
    pub high: u32,
    /// Counted guesses in order.
    pub history: Vec<u32>,
    /// Whether the game is won.
    pub won: bool,
    /// The target, once won.
    pub target: Option<u32>,
    /// The score, once won.
    pub score: Option<u32>,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            attempts: state.attempts(),
            low: state.low(),
            high: state.high(),
            history: state.history().to_vec(),
            won: state.won(),
            target: state.won().then(|| state.target()),
            score: state.score(),
        }
    }
}

type SharedTargets = Arc<Mutex<Box<dyn TargetSource + Send>>>;

/// Plays games on behalf of sessions.
///
/// Every operation is one atomic read-evaluate-write against the store, so
/// a double submit for one session is applied in sequence.
#[derive(Clone)]
pub struct GameService<S> {
    store: S,
    engine: GameEngine,
    targets: SharedTargets,
}

impl<S: std::fmt::Debug> std::fmt::Debug for GameService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<S: SessionStore> GameService<S> {
    /// Creates a service over `store`.
    pub fn new(store: S, engine: GameEngine, targets: impl TargetSource + Send + 'static) -> Self {
        Self::with_boxed_targets(store, engine, Box::new(targets))
    }

    /// Creates a service from an already boxed target source.
    pub fn with_boxed_targets(
        store: S,
        engine: GameEngine,
        targets: Box<dyn TargetSource + Send>,
    ) -> Self {
        Self {
            store,
            engine,
            targets: Arc::new(Mutex::new(targets)),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn fresh_state(&self) -> GameState {
        let mut targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
        GameState::fresh(&mut *targets)
    }

    /// Evaluates `raw` for the session, creating its game on first contact.
    #[instrument(skip(self, raw), fields(session_id = %id))]
    pub fn guess(&self, id: &SessionId, raw: Option<&str>) -> Turn {
        self.store.update(id, |current| {
            let state = current.unwrap_or_else(|| {
                info!("Creating game for new session");
                self.fresh_state()
            });
            let (state, outcome, message) = self.engine.evaluate(state, raw).into_parts();
            info!(%outcome, attempts = state.attempts(), "Guess handled");
            (state.clone(), Turn::new(outcome, message, state))
        })
    }

    /// Replaces the session's game with a fresh one.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn new_game(&self, id: &SessionId) -> Turn {
        self.store.update(id, |_| {
            let mut targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
            let (state, outcome, message) = self.engine.new_game(&mut *targets).into_parts();
            (state.clone(), Turn::new(outcome, message, state))
        })
    }

    /// A clue about the session's target. Never counts as a guess.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn hint(&self, id: &SessionId, kind: Option<Clue>) -> Result<String, ClueUnavailable> {
        let state = self.current(id);
        let clue = clue_for(&state, kind);
        if let Err(reason) = &clue {
            info!(%reason, "Clue refused");
        }
        clue
    }

    /// Returns the session's game, creating it on first contact.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn current(&self, id: &SessionId) -> GameState {
        self.store.update(id, |current| {
            let state = current.unwrap_or_else(|| {
                info!("Creating game for new session");
                self.fresh_state()
            });
            (state.clone(), state)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use guess_core::{FixedTarget, ScriptedTargets};

    fn service(target: u32) -> GameService<MemorySessionStore> {
        GameService::new(
            MemorySessionStore::new(),
            GameEngine::default(),
            FixedTarget::new(target).unwrap(),
        )
    }

    #[test]
    fn test_first_guess_creates_game() {
        let service = service(50);
        let id = SessionId::generate();
        assert!(service.store().get(&id).is_none());

        let turn = service.guess(&id, Some("25"));
        assert_eq!(*turn.outcome(), Outcome::TooLow);
        assert_eq!(service.store().get(&id).unwrap().attempts(), 1);
    }

    #[test]
    fn test_state_persists_between_guesses() {
        let service = service(50);
        let id = SessionId::generate();
        service.guess(&id, Some("25"));
        let turn = service.guess(&id, Some("75"));
        assert_eq!(turn.state().bracket(), (26, 74));
        assert_eq!(turn.state().history(), &[25, 75]);
    }

    #[test]
    fn test_invalid_guess_on_new_session_still_creates_game() {
        let service = service(50);
        let id = SessionId::generate();
        let turn = service.guess(&id, Some("abc"));
        assert_eq!(*turn.outcome(), Outcome::Invalid);
        assert_eq!(service.store().get(&id).unwrap().attempts(), 0);
    }

    #[test]
    fn test_new_game_replaces_state() {
        let service = GameService::new(
            MemorySessionStore::new(),
            GameEngine::default(),
            ScriptedTargets::new([10, 90]).unwrap(),
        );
        let id = SessionId::generate();
        assert_eq!(*service.guess(&id, Some("10")).outcome(), Outcome::Won);

        let turn = service.new_game(&id);
        assert_eq!(*turn.outcome(), Outcome::NewGame);
        assert_eq!(turn.state(), &GameState::new(90));
        assert_eq!(service.store().get(&id), Some(GameState::new(90)));
    }

    #[test]
    fn test_sessions_do_not_share_games() {
        let service = service(50);
        let (a, b) = (SessionId::generate(), SessionId::generate());
        service.guess(&a, Some("50"));
        let turn = service.guess(&b, Some("50"));
        assert_eq!(*turn.outcome(), Outcome::Won);
        assert_eq!(turn.state().attempts(), 1);
    }

    #[test]
    fn test_current_is_stable() {
        let service = service(33);
        let id = SessionId::generate();
        let first = service.current(&id);
        assert_eq!(service.current(&id), first);
    }

    #[test]
    fn test_hint_does_not_count() {
        let service = service(50);
        let id = SessionId::generate();
        assert_eq!(service.hint(&id, None), Err(ClueUnavailable::NoGuesses));

        service.guess(&id, Some("20"));
        assert_eq!(
            service.hint(&id, Some(Clue::Parity)).as_deref(),
            Ok("Hint: The number is even.")
        );
        assert_eq!(service.current(&id).attempts(), 1);
    }

    #[test]
    fn test_snapshot_hides_target_until_won() {
        let service = service(50);
        let id = SessionId::generate();
        let turn = service.guess(&id, Some("20"));
        assert_eq!(turn.snapshot().target, None);
        assert_eq!(turn.snapshot().score, None);
        let turn = service.guess(&id, Some("50"));
        assert_eq!(turn.snapshot().target, Some(50));
        assert_eq!(turn.snapshot().score, Some(900));
        assert_eq!(turn.snapshot().history, vec![20, 50]);
    }
}
