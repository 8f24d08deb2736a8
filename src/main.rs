use std::process::ExitCode;

use clap::Parser;

use shortlink_client::cli::Cli;
use shortlink_client::runtime;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    runtime::run(Cli::parse()).await
}
