//! Client-side session record and the token payload it is built from.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Refresh token lifetime assumed when the backend does not send one (30 days).
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 2_592_000;

fn default_token_type() -> String {
    "Bearer".to_owned()
}

/// Token payload returned by login, phone confirmation and refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Refresh token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<u64>,
}

impl TokenPayload {
    /// Creates a payload with only an access token.
    pub fn new(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            token_type: default_token_type(),
            access_token: access_token.into(),
            expires_in,
            refresh_token: None,
            refresh_expires_in: None,
        }
    }

    /// Attaches a refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }
}

impl fmt::Debug for TokenPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPayload")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}

/// The authenticated state held by a token store.
///
/// Sessions are replaced as a whole and never updated field by field.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(rename = "token_expires_at")]
    pub expires_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_at: Option<Timestamp>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl Session {
    /// Builds a session from a token payload received at `issued_at`.
    #[must_use]
    pub fn from_token(token: &TokenPayload, issued_at: Timestamp) -> Self {
        let refresh_expires_at = token.refresh_token.as_ref().map(|_| {
            let ttl = token.refresh_expires_in.unwrap_or(DEFAULT_REFRESH_TTL_SECS);
            offset(issued_at, ttl)
        });

        Self {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: offset(issued_at, token.expires_in),
            refresh_expires_at,
            token_type: token.token_type.clone(),
        }
    }

    /// Returns whether the access token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }

    /// Returns whether the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }

    /// Returns the refresh token if it is still usable at `now`.
    #[must_use]
    pub fn refresh_token_at(&self, now: Timestamp) -> Option<&str> {
        let token = self.refresh_token.as_deref()?;
        match self.refresh_expires_at {
            Some(expires_at) if expires_at <= now => None,
            _ => Some(token),
        }
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .field("token_type", &self.token_type)
            .finish()
    }
}

fn offset(from: Timestamp, secs: u64) -> Timestamp {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| from.checked_add(SignedDuration::from_secs(secs)).ok())
        .unwrap_or(Timestamp::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_at() -> Timestamp {
        "2025-03-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_token_payload_wire_shape() {
        let body = r#"{"type":"Bearer","access_token":"abc","expires_in":3600,"refresh_token":"r1"}"#;
        let token: TokenPayload = serde_json::from_str(body).unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert!(token.refresh_expires_in.is_none());
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let token: TokenPayload =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":60}"#).unwrap();
        assert_eq!(token.token_type, "Bearer");
    }

    #[test]
    fn test_session_from_token() {
        let token = TokenPayload::new("abc", 3600).with_refresh_token("r1");
        let session = Session::from_token(&token, issued_at());

        assert_eq!(session.access_token, "abc");
        assert_eq!(session.expires_at, "2025-03-01T13:00:00Z".parse().unwrap());
        assert_eq!(
            session.refresh_expires_at,
            Some("2025-03-31T12:00:00Z".parse().unwrap())
        );
        assert_eq!(session.authorization(), "Bearer abc");
    }

    #[test]
    fn test_no_refresh_expiry_without_refresh_token() {
        let session = Session::from_token(&TokenPayload::new("abc", 60), issued_at());
        assert!(session.refresh_expires_at.is_none());
        assert!(session.refresh_token_at(issued_at()).is_none());
    }

    #[test]
    fn test_expiry() {
        let session = Session::from_token(&TokenPayload::new("abc", 60), issued_at());
        let later: Timestamp = "2025-03-01T12:01:00Z".parse().unwrap();

        assert!(!session.is_expired_at(issued_at()));
        assert!(session.is_expired_at(later));
    }

    #[test]
    fn test_huge_lifetime_saturates() {
        let session = Session::from_token(&TokenPayload::new("abc", u64::MAX), issued_at());
        assert_eq!(session.expires_at, Timestamp::MAX);
    }

    #[test]
    fn test_refresh_token_expiry() {
        let mut token = TokenPayload::new("abc", 60).with_refresh_token("r1");
        token.refresh_expires_in = Some(120);
        let session = Session::from_token(&token, issued_at());

        let later: Timestamp = "2025-03-01T12:05:00Z".parse().unwrap();
        assert_eq!(session.refresh_token_at(issued_at()), Some("r1"));
        assert!(session.refresh_token_at(later).is_none());
    }

    #[test]
    fn test_session_record_shape() {
        let session = Session::from_token(&TokenPayload::new("abc", 60), issued_at());
        let value = serde_json::to_value(&session).unwrap();

        assert_eq!(value["access_token"], "abc");
        assert_eq!(value["token_expires_at"], "2025-03-01T12:01:00Z");
        assert!(value.get("refresh_token").is_none());

        let back: Session = serde_json::from_value(value).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let token = TokenPayload::new("secret-access", 60).with_refresh_token("secret-refresh");
        let session = Session::from_token(&token, issued_at());

        let output = format!("{session:?} {token:?}");
        assert!(!output.contains("secret-access"));
        assert!(!output.contains("secret-refresh"));
    }
}
