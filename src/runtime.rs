//! Startup and command dispatch
//!
//! Everything that owns process-wide resources (config, log writer guard)
//! lives in [`run`], so they are released before the process exits.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, error};

use crate::api::{ApiClient, UreqTransport};
use crate::cli::Cli;
use crate::config::init_config;
use crate::flows::select_clipboard;
use crate::interfaces::cli::{CliContext, CliError, run_cli_command};
use crate::session::{FileCredentialStore, SessionContext};
use crate::system::init_logging;

/// Load config, start logging, wire the client and run one command.
///
/// The log guard is dropped on return, flushing pending lines on every
/// exit path including command failure.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = init_config(cli.config.as_deref()).context("failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("failed to initialize logging")?;
    debug!("Configuration loaded, API base: {}", config.api.base_url);

    let store = FileCredentialStore::new(PathBuf::from(&config.session.storage_path));
    let session = Arc::new(SessionContext::new(Arc::new(store)));
    let transport = Arc::new(UreqTransport::new(Duration::from_secs(
        config.api.timeout_secs,
    )));
    let api = Arc::new(
        ApiClient::new(&config.api.base_url, transport, session)
            .context("invalid api.base_url")?,
    );
    let clipboard = select_clipboard(&config.clipboard);

    let ctx = CliContext::new(api, clipboard, config);
    match run_cli_command(cli.command, &ctx).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Rendered) => {
            debug!("Command failed, reason already shown");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", e.format_colored());
            Ok(ExitCode::FAILURE)
        }
    }
}
