//! In-process token store.

use std::sync::{PoisonError, RwLock};

use globens_core::Session;

use crate::{TRACING_TARGET_STORE, TokenStore};

/// Lock-protected in-memory session slot.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Session>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RwLock::new(Some(session)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn write(&self, session: &Session) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(session.clone());

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            expires_at = %session.expires_at,
            has_refresh_token = session.refresh_token.is_some(),
            "Stored session in memory"
        );
    }

    fn load(&self) -> Option<Session> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        let previous = self
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            had_session = previous.is_some(),
            "Cleared in-memory session"
        );
    }
}
