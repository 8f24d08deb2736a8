//! Stats command

use crate::flows::{Activation, LoadOutcome, StatsState, StatsView};
use crate::interfaces::cli::{CliContext, CliError};
use crate::interfaces::render::{render_redirect, render_stats};
use crate::session::Route;

pub async fn run_stats(ctx: &CliContext, short_code: &str) -> Result<(), CliError> {
    let view = StatsView::new(ctx.api.clone(), ctx.public_base_url());

    let activation = view.activate(short_code);
    match &activation {
        Activation::Redirect(route) => {
            eprintln!("{}", render_redirect(route));
            return Err(CliError::SessionRequired(route.clone()));
        }
        Activation::Skipped => {
            return Err(CliError::ParseError("short code must not be empty".into()));
        }
        Activation::Started(_) => {}
    }

    let outcome = activation.settle().await;
    let state = view.state();
    println!("{}", render_stats(short_code.trim(), &state));

    if outcome == Some(LoadOutcome::SessionExpired) {
        return Err(CliError::SessionRequired(Route::Login));
    }
    match state {
        StatsState::Failed(_) => Err(CliError::Rendered),
        _ => Ok(()),
    }
}
