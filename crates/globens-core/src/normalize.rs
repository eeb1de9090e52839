//! Conversion of every failure into a [`NormalizedError`].
//!
//! Rules are applied in order, first match wins:
//!
//! 1. a transport status carrying the backend error shape is used as the base,
//!    with `errors[]` folded into the message and the field map; 401/403
//!    always become the fixed "session expired" message,
//! 2. local precondition failures get a fixed message,
//! 3. network failures and timeouts get a fixed connectivity message,
//! 4. anything else gets the generic "request failed" message.

use bytes::Bytes;
use thiserror::Error;
use validator::ValidationErrors;

use crate::envelope::{ErrorEnvelope, FieldError};
use crate::error::{ErrorKind, NormalizedError};
use crate::locale::{Locale, Message};
use crate::TRACING_TARGET_NORMALIZE;

/// Outcome of an HTTP call that did not produce a 2xx response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// A response was received with a non-success status.
    #[error("HTTP status {status}")]
    Status { status: u16, body: Bytes },
    /// No response was received.
    #[error("network error: {reason}")]
    Network { reason: String },
    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Creates a status error from a raw body.
    pub fn status(status: u16, body: impl Into<Bytes>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a network error.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }
}

/// Local conditions that stop a call before it reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    /// The endpoint requires a session and none is stored.
    #[error("no session present")]
    NotAuthenticated,
    /// A refresh was requested without a usable refresh token.
    #[error("no refresh token present")]
    NoRefreshToken,
}

/// Anything a resource service call can fail with.
#[derive(Debug, Clone, Error)]
pub enum Failure {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Precondition(#[from] Precondition),
    /// A 2xx envelope reported `success: false`.
    #[error("rejected by backend: {message}")]
    Rejected { status: u16, message: String },
    /// The request body could not be encoded.
    #[error("encode error: {reason}")]
    Encode { reason: String },
    /// The response body could not be decoded.
    #[error("decode error: {reason}")]
    Decode { status: u16, reason: String },
}

/// Builds the combined message `"<message> <field>: <text>, ..."`.
#[must_use]
pub fn combine_field_errors(message: &str, errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return message.to_owned();
    }

    let fields = errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join(", ");

    if message.is_empty() {
        fields
    } else {
        format!("{message} {fields}")
    }
}

/// Locale-aware failure translator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    locale: Locale,
}

impl Normalizer {
    /// Creates a normalizer for the given locale.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Locale used for fixed messages.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Fixed message in this normalizer's locale.
    #[must_use]
    pub const fn text(&self, message: Message) -> &'static str {
        message.text(self.locale)
    }

    /// Converts any failure into the uniform envelope.
    pub fn normalize(&self, failure: Failure) -> NormalizedError {
        let error = match failure {
            Failure::Transport(TransportError::Status { status, body }) => {
                self.from_status(status, &body)
            }
            Failure::Precondition(Precondition::NotAuthenticated) => NormalizedError::new(
                ErrorKind::Precondition,
                self.text(Message::NotAuthenticated),
            ),
            Failure::Precondition(Precondition::NoRefreshToken) => NormalizedError::new(
                ErrorKind::Precondition,
                self.text(Message::RefreshUnavailable),
            ),
            Failure::Transport(TransportError::Network { .. }) => {
                NormalizedError::new(ErrorKind::Connectivity, self.text(Message::NoConnection))
            }
            Failure::Transport(TransportError::Timeout) => {
                NormalizedError::new(ErrorKind::Timeout, self.text(Message::ServerTimeout))
            }
            Failure::Transport(TransportError::Cancelled) => {
                NormalizedError::new(ErrorKind::Cancelled, self.text(Message::Cancelled))
            }
            Failure::Rejected { status, message } => {
                let message = if message.trim().is_empty() {
                    self.text(Message::RequestFailed).to_owned()
                } else {
                    message
                };
                NormalizedError::new(ErrorKind::Backend, message).with_status(status)
            }
            Failure::Encode { .. } => {
                NormalizedError::new(ErrorKind::Unknown, self.text(Message::RequestFailed))
            }
            Failure::Decode { status, .. } => {
                NormalizedError::new(ErrorKind::Unknown, self.text(Message::RequestFailed))
                    .with_status(status)
            }
        };

        tracing::debug!(
            target: TRACING_TARGET_NORMALIZE,
            kind = %error.kind(),
            status = ?error.status(),
            fields = error.field_errors().len(),
            "Normalized failure"
        );

        error
    }

    /// Converts local payload validation failures into the uniform envelope.
    pub fn validation(&self, errors: &ValidationErrors) -> NormalizedError {
        let mut fields = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |error| FieldError {
                    field: field.clone(),
                    message: error
                        .message
                        .as_deref()
                        .map_or_else(|| error.code.to_string(), str::to_owned),
                })
            })
            .collect::<Vec<_>>();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        let message = combine_field_errors(self.text(Message::InvalidData), &fields);
        fields
            .into_iter()
            .fold(
                NormalizedError::new(ErrorKind::Validation, message),
                |error, field| error.with_field_error(field.field, field.message),
            )
    }

    fn from_status(&self, status: u16, body: &[u8]) -> NormalizedError {
        if matches!(status, 401 | 403) {
            return NormalizedError::new(
                ErrorKind::Authentication,
                self.text(Message::SessionExpired),
            )
            .with_status(status);
        }

        let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
            let (kind, message) = if status == 404 {
                (ErrorKind::NotFound, Message::NotFound)
            } else {
                (ErrorKind::Unknown, Message::RequestFailed)
            };
            return NormalizedError::new(kind, self.text(message)).with_status(status);
        };

        let kind = match status {
            _ if !envelope.errors.is_empty() => ErrorKind::Validation,
            422 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            _ => ErrorKind::Backend,
        };

        let base = if !envelope.message.trim().is_empty() {
            envelope.message.as_str()
        } else if kind == ErrorKind::NotFound {
            self.text(Message::NotFound)
        } else {
            self.text(Message::RequestFailed)
        };
        let message = combine_field_errors(base, &envelope.errors);

        envelope
            .errors
            .into_iter()
            .fold(NormalizedError::new(kind, message), |error, field| {
                error.with_field_error(field.field, field.message)
            })
            .with_status(status)
    }
}
