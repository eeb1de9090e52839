#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use globens_client::{ApiClient, Services};
use globens_core::NormalizedError;
use globens_session::FileTokenStore;
use tokio::signal::ctrl_c;
use tokio_util::sync::CancellationToken;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "globens_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "globens_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "globens_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    // Service failures are printed in their wire shape.
    if let Some(normalized) = error.downcast_ref::<NormalizedError>() {
        match serde_json::to_string_pretty(normalized) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("Error: {normalized}"),
        }
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();

    let store = Arc::new(FileTokenStore::new(&cli.session_file));
    let client = ApiClient::new(cli.client.clone(), store).context("failed to create API client")?;

    let cancellation = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancellation.clone()));

    let services = Services::new(client).with_cancellation(cancellation);
    let command = cli.command.name();
    let output = cli.command.run(&services).await?;

    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        command,
        "Command completed"
    );

    let output = serde_json::to_string_pretty(&output).context("failed to format output")?;
    println!("{output}");

    Ok(())
}

/// Cancels in-flight calls on Ctrl+C.
async fn cancel_on_ctrl_c(token: CancellationToken) {
    if let Err(e) = ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %e,
            "Failed to install Ctrl+C handler"
        );
        return;
    }

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        "Received Ctrl+C, cancelling"
    );
    token.cancel();
}
