//! Shorten command

use colored::Colorize;

use crate::flows::{CreationFlow, SubmissionState};
use crate::interfaces::cli::{CliContext, CliError};
use crate::interfaces::render::render_creation;
use crate::models::ShortenRequest;

pub async fn run_shorten(
    ctx: &CliContext,
    url: String,
    code: Option<String>,
    expires_in_hrs: Option<u32>,
    copy: bool,
) -> Result<(), CliError> {
    let mut request = ShortenRequest::new(url);
    if let Some(code) = code.filter(|c| !c.trim().is_empty()) {
        request = request.with_custom_code(code.trim());
    }
    if let Some(hours) = expires_in_hrs {
        request = request.with_expiry_hours(hours);
    }

    let mut flow = CreationFlow::new(ctx.api.clone(), ctx.clipboard.clone(), ctx.copy_window());
    if let SubmissionState::Failed(msg) = flow.submit(request).await {
        return Err(CliError::RequestError(msg.clone()));
    }

    if copy && !flow.copy_short_url() {
        eprintln!(
            "{} Could not copy to clipboard ({})",
            "!".yellow().bold(),
            ctx.clipboard.name()
        );
    }

    println!(
        "{}",
        render_creation(flow.state(), flow.is_copied(), flow.is_signed_in())
    );
    Ok(())
}
