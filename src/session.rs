//! In-memory game session store.
//!
//! Maps short join codes to live games and hands each seat an opaque token
//! for re-authentication. No game logic lives here; transports look up a
//! session, drive the `TurnController`, and write the result back.
//!
//! Sessions idle for 24 hours are purged lazily on the next store access.
//! The clock is injected so eviction is testable without sleeping.

use std::time::{Duration, SystemTime};

use rand::distributions::Alphanumeric;
use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::core::{GameState, PlayerId};
use crate::turn::TurnState;

/// Sessions untouched for this long are evicted.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

const JOIN_CODE_LEN: usize = 6;
const TOKEN_LEN: usize = 32;

/// A time source. The store is generic over this so tests can move time
/// forward explicitly.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// One stored game: snapshot, turn progress, and per-seat tokens.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub state: GameState,
    pub turn: TurnState,
    tokens: FxHashMap<PlayerId, String>,
    last_access: SystemTime,
}

impl Session {
    /// The opaque token handed to one seat when the session was created.
    #[must_use]
    pub fn token_for(&self, player: PlayerId) -> Option<&str> {
        self.tokens.get(&player).map(String::as_str)
    }
}

/// In-memory session registry keyed by join code.
#[derive(Debug)]
pub struct SessionStore<C: Clock = SystemClock> {
    sessions: FxHashMap<String, Session>,
    clock: C,
}

impl SessionStore<SystemClock> {
    /// A store on wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SessionStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionStore<C> {
    /// A store on an injected clock.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self { sessions: FxHashMap::default(), clock }
    }

    /// Register a new game, returning its join code.
    ///
    /// Generates one token per seated player; fetch them with
    /// [`Session::token_for`] before handing the code out.
    pub fn create(&mut self, state: GameState) -> String {
        self.evict_idle();

        let mut rng = rand::thread_rng();
        let mut id = random_string(&mut rng, JOIN_CODE_LEN);
        while self.sessions.contains_key(&id) {
            id = random_string(&mut rng, JOIN_CODE_LEN);
        }

        let tokens = PlayerId::all(state.player_count())
            .map(|p| (p, random_string(&mut rng, TOKEN_LEN)))
            .collect();

        let session = Session {
            id: id.clone(),
            state,
            turn: TurnState::default(),
            tokens,
            last_access: self.clock.now(),
        };
        self.sessions.insert(id.clone(), session);
        info!(%id, "session created");
        id
    }

    /// Look up a session, refreshing its idle timer.
    pub fn get(&mut self, id: &str) -> Option<&Session> {
        self.evict_idle();
        let now = self.clock.now();
        let session = self.sessions.get_mut(id)?;
        session.last_access = now;
        Some(&*session)
    }

    /// Check a seat's token against the one issued at creation.
    pub fn authorize(&mut self, id: &str, player: PlayerId, token: &str) -> bool {
        self.get(id)
            .and_then(|s| s.token_for(player))
            .is_some_and(|issued| issued == token)
    }

    /// Store a new snapshot and turn state for an existing session.
    /// Returns `false` for unknown (or already evicted) codes.
    pub fn update(&mut self, id: &str, state: GameState, turn: TurnState) -> bool {
        self.evict_idle();
        let now = self.clock.now();
        match self.sessions.get_mut(id) {
            Some(session) => {
                session.state = state;
                session.turn = turn;
                session.last_access = now;
                true
            }
            None => false,
        }
    }

    /// Drop a session.
    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    /// Join codes of all live sessions, sorted.
    pub fn list(&mut self) -> Vec<String> {
        self.evict_idle();
        let mut ids: Vec<String> = self.sessions.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of live sessions (without refreshing timers).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict_idle(&mut self) {
        let now = self.clock.now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| {
            now.duration_since(s.last_access)
                .map_or(true, |idle| idle < IDLE_TIMEOUT)
        });
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, "idle sessions purged");
        }
    }
}

fn random_string(rng: &mut impl Rng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
