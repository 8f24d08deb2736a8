//! CLI interface module
//!
//! Each command activates one view flow, waits for it to settle and prints
//! the rendered state.

pub mod commands;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::ClientError;
use crate::flows::{ClipboardProvider, failure_message};
use crate::session::Route;
use commands::{
    config_generate, run_dashboard, run_login, run_logout, run_register, run_shorten, run_stats,
    run_whoami,
};

#[derive(Debug)]
pub enum CliError {
    /// Owner-only view without a usable credential
    SessionRequired(Route),
    RequestError(String),
    /// The rendered view already shows why; only the exit status is left
    Rendered,
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::SessionRequired(route) => {
                format!("Login required: run `shortlink login` ({})", route)
            }
            CliError::RequestError(msg) => format!("Request error: {}", msg),
            CliError::Rendered => "Command failed".to_string(),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::SessionRequired(route) => format!(
                "{} run {} ({})",
                "Login required:".yellow().bold(),
                "shortlink login".cyan(),
                route
            ),
            CliError::RequestError(msg) => {
                format!("{} {}", "Request error:".red().bold(), msg.white())
            }
            CliError::Rendered => "Command failed".red().to_string(),
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

/// 与创建流程一致：后端 `error` 字段，否则通用提示；细节只进日志
impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(msg) => CliError::ParseError(msg),
            other => CliError::RequestError(failure_message(&other)),
        }
    }
}

/// Shared handles for every command
#[derive(Clone)]
pub struct CliContext {
    pub api: Arc<ApiClient>,
    pub clipboard: Arc<dyn ClipboardProvider>,
    pub config: Arc<StaticConfig>,
}

impl CliContext {
    pub fn new(
        api: Arc<ApiClient>,
        clipboard: Arc<dyn ClipboardProvider>,
        config: Arc<StaticConfig>,
    ) -> Self {
        Self {
            api,
            clipboard,
            config,
        }
    }

    pub fn public_base_url(&self) -> &str {
        &self.config.api.public_base_url
    }

    pub fn copy_window(&self) -> Duration {
        Duration::from_millis(self.config.clipboard.copied_reset_ms)
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, ctx: &CliContext) -> Result<(), CliError> {
    match cmd {
        Commands::Shorten {
            url,
            code,
            expires_in_hrs,
            copy,
        } => run_shorten(ctx, url, code, expires_in_hrs, copy).await,

        Commands::Dashboard => run_dashboard(ctx).await,

        Commands::Stats { short_code } => run_stats(ctx, &short_code).await,

        Commands::Login { email, password } => run_login(ctx, email, password).await,

        Commands::Register {
            username,
            email,
            password,
        } => run_register(ctx, username, email, password).await,

        Commands::Logout => run_logout(ctx),

        Commands::Whoami => run_whoami(ctx).await,

        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                config_generate(output_path, force).await
            }
        },
    }
}
