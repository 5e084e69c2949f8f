use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use quiz_core::model::SessionKey;

use super::service::ExerciseSession;
use crate::error::SessionError;

/// Per-user sessions for hosts that serve more than one learner.
///
/// Each learner's session is independent; the registry only routes a key to
/// the session it owns.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionKey, ExerciseSession>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` under a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::LockPoisoned` if the registry lock is poisoned.
    pub fn open(&self, session: ExerciseSession) -> Result<SessionKey, SessionError> {
        let key = SessionKey::generate();
        self.lock()?.insert(key, session);
        tracing::debug!(%key, "session opened");
        Ok(key)
    }

    /// Run `f` against the session stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` if nothing is stored under `key`.
    pub fn with_session<T>(
        &self,
        key: SessionKey,
        f: impl FnOnce(&mut ExerciseSession) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&key)
            .ok_or(SessionError::UnknownSession(key))?;
        Ok(f(session))
    }

    /// Swap in a new session for `key`, e.g. after a restart or level change.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` if nothing is stored under `key`.
    pub fn replace(&self, key: SessionKey, session: ExerciseSession) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        let slot = sessions
            .get_mut(&key)
            .ok_or(SessionError::UnknownSession(key))?;
        *slot = session;
        Ok(())
    }

    /// Drop the session for `key`, returning it if present.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::LockPoisoned` if the registry lock is poisoned.
    pub fn remove(&self, key: SessionKey) -> Result<Option<ExerciseSession>, SessionError> {
        Ok(self.lock()?.remove(&key))
    }

    /// # Errors
    ///
    /// Returns `SessionError::LockPoisoned` if the registry lock is poisoned.
    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    ///
    /// Returns `SessionError::LockPoisoned` if the registry lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionKey, ExerciseSession>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|e| SessionError::LockPoisoned(e.to_string()))
    }
}
