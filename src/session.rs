//! Game session management.
//!
//! Each session owns one [`Game`] behind its own lock, so actions against
//! the same game serialize while separate games proceed independently.
//! The registry lock is only held to look a session up or to insert and
//! remove one.

use crate::games::avalon::{Action, Game, Rejection, VoteResolution};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Session registry failure.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// No session with this id.
    #[display("Session {_0} not found")]
    NotFound(#[error(not(source))] SessionId),

    /// A session with this id is already registered.
    #[display("Session {_0} already exists")]
    AlreadyExists(#[error(not(source))] SessionId),

    /// A lock was poisoned by a panicking holder.
    #[display("Session lock poisoned")]
    Poisoned,
}

/// A hosted game.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game.
    pub game: Game,
}

impl GameSession {
    /// Wraps a game in a session.
    #[instrument(skip(game), fields(players = game.players().len()))]
    pub fn new(id: SessionId, game: Game) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self { id, game }
    }

    /// Applies an action to the session's game.
    #[instrument(skip(self, action), fields(session_id = %self.id, %action))]
    pub fn apply(&mut self, action: Action) -> Result<Option<VoteResolution>, Rejection> {
        let outcome = self.game.apply(action).inspect_err(|e| {
            warn!(error = %e, "Session action rejected");
        })?;
        debug!(phase = %self.game.phase(), "Session action applied");
        Ok(outcome)
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, Arc<Mutex<GameSession>>>>>,
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    /// Registers `game` under `id`.
    #[instrument(skip(self, game))]
    pub fn create_session(&self, id: SessionId, game: Game) -> Result<SessionId, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists(id));
        }

        let session = GameSession::new(id.clone(), game);
        sessions.insert(id.clone(), Arc::new(Mutex::new(session)));

        info!(session_id = %id, "Created new session");
        Ok(id)
    }

    /// Returns the shared handle for a session.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        sessions.get(id).cloned().ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::NotFound(id.to_string())
        })
    }

    /// Runs `f` with exclusive access to one session.
    ///
    /// Only the session's own lock is held while `f` runs.
    #[instrument(skip(self, f))]
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession) -> T,
    ) -> Result<T, SessionError> {
        let handle = self.get_session(id)?;
        let mut session = handle.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(f(&mut session))
    }

    /// Lists all active session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        let mut ids: Vec<_> = sessions.keys().cloned().collect();
        ids.sort();
        info!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }

    /// Removes a session, returning its handle.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        let removed = sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        info!(session_id = id, "Removed session");
        Ok(removed)
    }
}
