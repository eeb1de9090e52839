//! Client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use globens_core::Locale;
use serde::{Deserialize, Serialize};

use crate::{BodyKind, ResourceGroup};

/// Default backend base URL, including the versioned prefix.
pub const DEFAULT_API_URL: &str = "https://admin.globens.uz/api/v1";

/// Default timeout for JSON requests: 10 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default timeout for profile JSON requests: 15 seconds.
pub const DEFAULT_PROFILE_TIMEOUT_SECS: u64 = 15;

/// Default timeout for multipart uploads: 30 seconds.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Configuration shared by every resource group.
///
/// This is the only place the backend base URL is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ClientConfig {
    /// Backend base URL, including the versioned prefix
    #[cfg_attr(
        feature = "config",
        arg(long = "api-url", env = "GLOBENS_API_URL", default_value = DEFAULT_API_URL)
    )]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Interface language sent as `Accept-Language`
    #[cfg_attr(
        feature = "config",
        arg(long = "locale", env = "GLOBENS_LOCALE", default_value = "uz")
    )]
    #[serde(default)]
    pub locale: Locale,

    /// Timeout for JSON requests in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "GLOBENS_HTTP_TIMEOUT", default_value = "10")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// Timeout for profile JSON requests in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "http-profile-timeout",
            env = "GLOBENS_HTTP_PROFILE_TIMEOUT",
            default_value = "15"
        )
    )]
    #[serde(default = "default_profile_timeout_secs")]
    pub http_profile_timeout: u64,

    /// Timeout for multipart uploads in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "http-upload-timeout",
            env = "GLOBENS_HTTP_UPLOAD_TIMEOUT",
            default_value = "30"
        )
    )]
    #[serde(default = "default_upload_timeout_secs")]
    pub http_upload_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "GLOBENS_HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_profile_timeout_secs() -> u64 {
    DEFAULT_PROFILE_TIMEOUT_SECS
}

fn default_upload_timeout_secs() -> u64 {
    DEFAULT_UPLOAD_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            locale: Locale::default(),
            http_timeout: default_timeout_secs(),
            http_profile_timeout: default_profile_timeout_secs(),
            http_upload_timeout: default_upload_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at the given base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Returns the effective base URL, using the default if empty.
    pub fn effective_api_url(&self) -> &str {
        let api_url = self.api_url.trim();
        if api_url.is_empty() {
            DEFAULT_API_URL
        } else {
            api_url
        }
    }

    /// Returns the effective JSON timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        effective(self.http_timeout, DEFAULT_TIMEOUT_SECS)
    }

    /// Returns the effective profile timeout, using the default if zero.
    pub fn effective_profile_timeout(&self) -> Duration {
        effective(self.http_profile_timeout, DEFAULT_PROFILE_TIMEOUT_SECS)
    }

    /// Returns the effective upload timeout, using the default if zero.
    pub fn effective_upload_timeout(&self) -> Duration {
        effective(self.http_upload_timeout, DEFAULT_UPLOAD_TIMEOUT_SECS)
    }

    /// Returns the timeout applied to a call of the given group and body kind.
    pub fn timeout_for(&self, group: ResourceGroup, body: BodyKind) -> Duration {
        match (group, body) {
            (_, BodyKind::Multipart) => self.effective_upload_timeout(),
            (ResourceGroup::Profile, _) => self.effective_profile_timeout(),
            _ => self.effective_timeout(),
        }
    }

    /// Returns the effective user agent, using the default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|user_agent| !user_agent.trim().is_empty())
            .unwrap_or_else(Self::default_user_agent)
    }

    fn default_user_agent() -> String {
        format!("globens-client/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the interface locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the JSON timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

fn effective(secs: u64, default_secs: u64) -> Duration {
    if secs == 0 {
        Duration::from_secs(default_secs)
    } else {
        Duration::from_secs(secs)
    }
}
