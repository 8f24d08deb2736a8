//! shortlink-client - client for a URL shortening service
//!
//! Shortens links for anyone and, for signed-in owners, lists their links
//! and per-link statistics. Views are headless state machines rendered by
//! the CLI.
//!
//! # Features
//! - **native-clipboard**: platform clipboard via arboard (default); without
//!   it only the copy-command fallback is available
//!
//! # Architecture
//! - `api`: HTTP client for the backend (base URL, bearer credential, JSON)
//! - `session`: credential store and the owner-only view guard
//! - `flows`: creation, dashboard, stats and account flows
//! - `interfaces`: rendering and CLI commands
//! - `config`: Configuration management
//! - `runtime`: startup and command dispatch
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod flows;
pub mod interfaces;
pub mod models;
pub mod runtime;
pub mod session;
pub mod system;
pub mod utils;
