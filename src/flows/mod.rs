//! View flows
//!
//! Each flow owns the transient state of one view and drives it through the
//! shared [`ApiClient`](crate::api::ApiClient):
//!
//! ```text
//! UI event → ApiClient call → normalization → view state → render
//! ```
//!
//! Every asynchronous operation settles into a defined state (loading,
//! success, error or empty); none is left pending.

pub mod auth;
pub mod clipboard;
pub mod collection;
pub mod creation;
pub mod generation;
pub mod stats;

pub use auth::{AuthFlow, ProfileOutcome};
pub use clipboard::{ClipboardProvider, CopyIndicator, select_clipboard};
pub use collection::{DashboardState, DashboardView, LinksPayload, normalize_links};
pub use creation::{CreationFlow, GENERIC_FAILURE_MESSAGE, SubmissionState, failure_message};
pub use generation::{ActivationCounter, Generation, LoadOutcome};
pub use stats::{StatsState, StatsView};

use tokio::task::JoinHandle;

use crate::session::Route;

/// What activating an owner-only view did
#[derive(Debug)]
pub enum Activation {
    /// No credential: nothing fetched, go here instead
    Redirect(Route),
    /// Fetch running in the background; the view shows its loading state
    Started(JoinHandle<LoadOutcome>),
    /// Nothing to fetch (e.g. empty short code)
    Skipped,
}

impl Activation {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Activation::Redirect(_))
    }

    /// Wait for the fetch, if one was started
    pub async fn settle(self) -> Option<LoadOutcome> {
        match self {
            Activation::Started(handle) => match handle.await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    tracing::error!("View fetch task failed: {}", e);
                    None
                }
            },
            Activation::Redirect(_) | Activation::Skipped => None,
        }
    }
}

/// Absolute short URL for a code when the backend did not provide one
pub(crate) fn derive_short_url(public_base_url: &str, short_code: &str) -> String {
    format!("{}/{}", public_base_url.trim_end_matches('/'), short_code)
}

/// Clear a credential the backend rejected
pub(crate) fn expire_session(session: &crate::session::SessionContext) {
    tracing::info!("Credential rejected by backend, clearing session");
    if let Err(e) = session.sign_out() {
        tracing::warn!("Failed to clear rejected credential: {}", e);
    }
}
