//! CLI command implementations

mod account;
mod config_gen;
mod dashboard;
mod shorten;
mod stats;

pub use account::{run_login, run_logout, run_register, run_whoami};
pub use config_gen::config_generate;
pub use dashboard::run_dashboard;
pub use shorten::run_shorten;
pub use stats::run_stats;
