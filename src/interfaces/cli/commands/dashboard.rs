//! Dashboard command

use crate::flows::{Activation, DashboardView, LoadOutcome};
use crate::interfaces::cli::{CliContext, CliError};
use crate::interfaces::render::{render_dashboard, render_redirect};
use crate::session::Route;

pub async fn run_dashboard(ctx: &CliContext) -> Result<(), CliError> {
    let view = DashboardView::new(ctx.api.clone(), ctx.public_base_url());

    let activation = view.activate();
    if let Activation::Redirect(route) = &activation {
        eprintln!("{}", render_redirect(route));
        return Err(CliError::SessionRequired(route.clone()));
    }

    let outcome = activation.settle().await;
    println!("{}", render_dashboard(&view.state()));

    if outcome == Some(LoadOutcome::SessionExpired) {
        return Err(CliError::SessionRequired(Route::Login));
    }
    Ok(())
}
