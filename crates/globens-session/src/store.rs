//! The token store seam.

use std::fmt;

use globens_core::Session;
use jiff::Timestamp;

/// Single source of truth for the current session.
///
/// Implementations hold at most one session; `write` replaces it as a whole.
/// None of the operations fail: storage problems are logged and read as
/// absence.
pub trait TokenStore: fmt::Debug + Send + Sync {
    /// Replaces the stored session.
    fn write(&self, session: &Session);

    /// Returns the stored session without checking its expiry.
    fn load(&self) -> Option<Session>;

    /// Removes the stored session. Clearing an empty store is a no-op.
    fn clear(&self);

    /// Returns the stored session if it has not expired at `now`.
    fn session_at(&self, now: Timestamp) -> Option<Session> {
        self.load().filter(|session| !session.is_expired_at(now))
    }

    /// Returns the stored session if it has not expired.
    fn session(&self) -> Option<Session> {
        self.session_at(Timestamp::now())
    }

    /// Returns the current access token, if any.
    fn read(&self) -> Option<String> {
        self.session().map(|session| session.access_token)
    }

    /// Returns whether a usable access token is stored.
    fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }
}
