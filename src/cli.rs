//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for shortlink using clap's derive macros.

use clap::{Parser, Subcommand};

/// shortlink - client for a URL shortening service
#[derive(Parser)]
#[command(name = "shortlink")]
#[command(version)]
#[command(about = "Shorten links and track them on your dashboard", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml, optional)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Shorten a URL
    Shorten {
        /// Long URL (http or https)
        url: String,

        /// Custom short code
        #[arg(long)]
        code: Option<String>,

        /// Expire the link after this many hours
        #[arg(long)]
        expires_in_hrs: Option<u32>,

        /// Copy the short URL to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// List your short links (login required)
    Dashboard,

    /// Show statistics for one short link (login required)
    Stats {
        /// Short code
        short_code: String,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
