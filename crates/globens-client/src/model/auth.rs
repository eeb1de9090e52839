//! Authentication payloads.

use std::borrow::Cow;
use std::fmt;

use globens_core::TokenPayload;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::validate;

/// Account summary returned by authentication endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub full_name: String,
}

/// `data` of authentication responses.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenPayload>,
}

/// Account registration.
#[must_use]
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct Register {
    #[validate(custom(function = "validate::phone"))]
    pub phone: String,
    #[validate(length(min = 2, message = "full name must be at least 2 characters long"))]
    pub full_name: String,
    #[validate(length(min = 3, message = "username must be at least 3 characters long"))]
    #[validate(custom(function = "validate::username"))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password_confirmation: String,
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Register")
            .field("phone", &self.phone)
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Username and password login.
#[must_use]
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct Login {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
}

impl Login {
    /// Creates a login payload.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            persistent: None,
        }
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login")
            .field("username", &self.username)
            .field("persistent", &self.persistent)
            .finish_non_exhaustive()
    }
}

/// One-time password confirming a phone number.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmPhone {
    #[validate(custom(function = "validate::phone"))]
    pub phone: String,
    #[validate(length(min = 1, message = "code is required"))]
    pub otp: String,
}

/// Request to send a new one-time password.
///
/// At least one of `username` or `phone` must be present.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ResendOtp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Validate for ResendOtp {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty())
        };

        if !present(&self.username) && !present(&self.phone) {
            errors.add(
                "username",
                ValidationError::new("required")
                    .with_message(Cow::Borrowed("username or phone is required")),
            );
        }

        if let Some(phone) = self.phone.as_deref().filter(|phone| !phone.is_empty())
            && let Err(error) = validate::phone(phone)
        {
            errors.add("phone", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest").finish_non_exhaustive()
    }
}
