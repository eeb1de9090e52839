//! The uniform failure envelope surfaced by every resource service.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::envelope::MessageType;

/// Type alias for Results with [`NormalizedError`] as the default error.
pub type Result<T, E = NormalizedError> = std::result::Result<T, E>;

/// Categories of failures a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Request payload was rejected, locally or by the backend.
    Validation,
    /// The backend refused the credentials (401/403).
    Authentication,
    /// The requested resource does not exist.
    NotFound,
    /// No response was received.
    Connectivity,
    /// The request did not complete within its timeout.
    Timeout,
    /// A local precondition failed before any network call.
    Precondition,
    /// The call was cancelled by the caller.
    Cancelled,
    /// The backend reported a failure without field details.
    Backend,
    /// Anything else.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Returns whether the failure happened before a request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Precondition | Self::Cancelled)
    }
}

/// Uniform error envelope.
///
/// `success` is always `false` and `message_type` is always
/// [`MessageType::Error`]; neither can be changed after construction.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct NormalizedError {
    success: bool,
    message: String,
    message_type: MessageType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    field_errors: BTreeMap<String, String>,
    kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl NormalizedError {
    /// Creates a new error of the given kind with a message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            message_type: MessageType::Error,
            field_errors: BTreeMap::new(),
            kind,
            status: None,
        }
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Records a field-level message; a later call for the same field wins.
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors.insert(field.into(), message.into());
        self
    }

    /// Attaches the HTTP status the failure was derived from.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Always `false`.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Always [`MessageType::Error`].
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Field-level messages keyed by field name.
    #[must_use]
    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    /// Message recorded for one field.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }
}
