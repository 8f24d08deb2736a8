//! Text rendering of view states
//!
//! Pure functions from state to text so that every state renders
//! deterministically, including loading, empty and error states.

use colored::Colorize;

use crate::flows::{DashboardState, StatsState, SubmissionState};
use crate::models::ShortLink;
use crate::session::Route;

pub const EMPTY_COLLECTION_ROW: &str = "No URLs found. Create one!";

const ORIGINAL_URL_WIDTH: usize = 48;

pub fn render_creation(state: &SubmissionState, copied: bool, signed_in: bool) -> String {
    let mut out = Vec::new();
    match state {
        SubmissionState::Idle => {}
        SubmissionState::Submitting => out.push("Shortening...".dimmed().to_string()),
        SubmissionState::Succeeded(resp) => {
            out.push("Success! Here is your short link:".green().bold().to_string());
            let copy_label = if copied { "Copied!" } else { "Copy" };
            out.push(format!(
                "  {}  [{}]",
                resp.short_url.cyan().underline(),
                copy_label
            ));
            if let Some(expires_at) = resp.expires_at {
                out.push(
                    format!("  (expires: {})", expires_at.format("%Y-%m-%d %H:%M:%S UTC"))
                        .dimmed()
                        .yellow()
                        .to_string(),
                );
            }
        }
        SubmissionState::Failed(msg) => out.push(format!("{} {}", "✗".red().bold(), msg.red())),
    }

    out.push(if signed_in {
        format!("Go to {} ({})", "Dashboard".blue(), Route::Dashboard)
    } else {
        format!(
            "Want to track your links? {} or {}",
            "Login".blue(),
            "Sign up".blue()
        )
    });
    out.join("\n")
}

pub fn render_dashboard(state: &DashboardState) -> String {
    let links = match state {
        DashboardState::Loading => return "Loading dashboard...".dimmed().to_string(),
        DashboardState::Ready(links) => links,
    };

    let mut out = vec![
        "My Dashboard".bold().green().to_string(),
        String::new(),
        format!(
            "  {:<width$}  {:<12}  {:>8}  {:<10}",
            "ORIGINAL URL",
            "SHORT LINK",
            "CLICKS",
            "CREATED AT",
            width = ORIGINAL_URL_WIDTH
        )
        .dimmed()
        .to_string(),
    ];

    if links.is_empty() {
        out.push(format!("  {}", EMPTY_COLLECTION_ROW));
    } else {
        out.extend(links.iter().map(render_link_row));
        out.push(String::new());
        out.push(format!(
            "{} Total {} short links",
            "ℹ".bold().blue(),
            links.len().to_string().green()
        ));
    }
    out.join("\n")
}

fn render_link_row(link: &ShortLink) -> String {
    format!(
        "  {:<width$}  {:<12}  {:>8}  {:<10}  {}",
        truncate(&link.original_url, ORIGINAL_URL_WIDTH),
        link.short_code,
        link.clicks,
        link.created_at.format("%Y-%m-%d"),
        link.short_url.dimmed(),
        width = ORIGINAL_URL_WIDTH
    )
}

pub fn render_stats(short_code: &str, state: &StatsState) -> String {
    match state {
        StatsState::Idle => "No short code given".dimmed().to_string(),
        StatsState::Loading => "Loading stats...".dimmed().to_string(),
        StatsState::Failed(msg) => msg.red().to_string(),
        StatsState::Loaded(stats) => {
            let mut out = vec![
                format!("Stats for /{}", short_code).bold().to_string(),
                String::new(),
                format!("  Total Clicks  {}", stats.clicks.to_string().cyan().bold()),
                format!(
                    "  Created At    {}",
                    stats.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                format!("  Original URL  {}", stats.original_url.blue().underline()),
                format!("  Short URL     {}", stats.short_url.cyan()),
            ];
            if let Some(expires_at) = stats.expires_at {
                out.push(format!(
                    "  Expires At    {}",
                    expires_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
            out.join("\n")
        }
    }
}

pub fn render_redirect(route: &Route) -> String {
    format!(
        "{} Please log in to continue (redirecting to {})",
        "!".yellow().bold(),
        route
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
