//! CLI configuration.
//!
//! ```text
//! Cli
//! ├── client: ClientConfig   # Base URL, locale, timeouts
//! ├── session_file: PathBuf  # Where the session record is kept
//! └── command: Command       # What to do
//! ```
//!
//! Every option can also be provided through its environment variable.
//!
//! ```bash
//! globens --locale en login alice
//! GLOBENS_API_URL="http://localhost:8000/api/v1" globens games --per-page 40
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use globens_client::ClientConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Default location of the session record.
pub const DEFAULT_SESSION_FILE: &str = ".globens-session.json";

/// Complete CLI configuration.
#[derive(Debug, Parser)]
#[command(name = "globens")]
#[command(about = "Globens esports platform client")]
#[command(version)]
pub struct Cli {
    /// Backend connection and locale.
    #[clap(flatten)]
    pub client: ClientConfig,

    /// File holding the session between invocations
    #[arg(long, env = "GLOBENS_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads a `.env` file (when enabled) and parses the arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Installs the subscriber. Logs go to stderr so stdout stays JSON.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Logs the configuration (no credentials).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.client.effective_api_url(),
            locale = %self.client.locale,
            timeout_secs = self.client.effective_timeout().as_secs(),
            profile_timeout_secs = self.client.effective_profile_timeout().as_secs(),
            upload_timeout_secs = self.client.effective_upload_timeout().as_secs(),
            session_file = %self.session_file.display(),
            command = self.command.name(),
            "Client configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use globens_core::Locale;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["globens", "status"]).unwrap();

        assert_eq!(cli.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        assert_eq!(cli.client.locale, Locale::Uz);
        assert_eq!(cli.client.effective_timeout().as_secs(), 10);
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "globens",
            "--api-url",
            "http://localhost:8000/api/v1",
            "--locale",
            "RU",
            "--session-file",
            "/tmp/session.json",
            "games",
            "--per-page",
            "40",
        ])
        .unwrap();

        assert_eq!(cli.client.api_url, "http://localhost:8000/api/v1");
        assert_eq!(cli.client.locale, Locale::Ru);
        assert_eq!(cli.session_file, PathBuf::from("/tmp/session.json"));
        assert!(matches!(
            cli.command,
            Command::Games {
                page: 1,
                per_page: 40
            }
        ));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        assert!(Cli::try_parse_from(["globens", "--locale", "de", "status"]).is_err());
    }
}
