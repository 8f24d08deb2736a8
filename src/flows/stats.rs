//! Single-link statistics
//!
//! Unlike the dashboard, a failed fetch here is shown to the user: a missing
//! link is a navigation error, not an empty state.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::generation::{ActivationCounter, Generation, LoadOutcome};
use super::{Activation, derive_short_url, expire_session};
use crate::api::ApiClient;
use crate::api::constants::stats_path;
use crate::models::LinkStats;
use crate::session::{Access, SessionGuard};

pub const STATS_FAILURE_MESSAGE: &str = "Failed to load stats";

#[derive(Debug, Clone, PartialEq)]
pub enum StatsState {
    /// No short code to look up
    Idle,
    Loading,
    Loaded(LinkStats),
    /// Error text; no stats fields are rendered in this state
    Failed(String),
}

struct StatsInner {
    api: Arc<ApiClient>,
    public_base_url: String,
    counter: ActivationCounter,
    state: Mutex<StatsState>,
}

/// Stats view handle; clones share the same state.
#[derive(Clone)]
pub struct StatsView {
    inner: Arc<StatsInner>,
}

impl StatsView {
    pub fn new(api: Arc<ApiClient>, public_base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(StatsInner {
                api,
                public_base_url: public_base_url.into(),
                counter: ActivationCounter::new(),
                state: Mutex::new(StatsState::Idle),
            }),
        }
    }

    pub fn state(&self) -> StatsState {
        self.inner.state.lock().clone()
    }

    /// Activate for `short_code`. Redirects without a credential; an empty
    /// code fetches nothing and leaves the view idle.
    pub fn activate(&self, short_code: &str) -> Activation {
        if let Access::Redirect(route) = SessionGuard::check(self.inner.api.session()) {
            return Activation::Redirect(route);
        }

        let generation = self.inner.counter.advance();
        let code = short_code.trim().to_string();
        if code.is_empty() {
            *self.inner.state.lock() = StatsState::Idle;
            return Activation::Skipped;
        }

        *self.inner.state.lock() = StatsState::Loading;
        let view = self.clone();
        Activation::Started(tokio::spawn(async move {
            view.load_stats(&code, generation).await
        }))
    }

    /// Fetch and apply stats for `short_code` under `generation`
    pub async fn load_stats(&self, short_code: &str, generation: Generation) -> LoadOutcome {
        let result = self
            .inner
            .api
            .get_as::<LinkStats>(&stats_path(short_code))
            .await;

        if !self.inner.counter.is_current(generation) {
            debug!(
                "Discarding stats for /{} from stale activation {}",
                short_code,
                generation.value()
            );
            return LoadOutcome::Discarded;
        }

        let (state, outcome) = match result {
            Ok(mut stats) => {
                if stats.short_code.is_empty() {
                    stats.short_code = short_code.to_string();
                }
                if stats.short_url.is_empty() {
                    stats.short_url =
                        derive_short_url(&self.inner.public_base_url, &stats.short_code);
                }
                (StatsState::Loaded(stats), LoadOutcome::Applied)
            }
            Err(e) => {
                warn!("Failed to fetch stats for /{}: {}", short_code, e);
                let message = match e.api_message() {
                    Some(detail) => format!("{}: {}", STATS_FAILURE_MESSAGE, detail),
                    None => STATS_FAILURE_MESSAGE.to_string(),
                };
                let outcome = if e.is_unauthorized() {
                    expire_session(self.inner.api.session());
                    LoadOutcome::SessionExpired
                } else {
                    LoadOutcome::Applied
                };
                (StatsState::Failed(message), outcome)
            }
        };

        *self.inner.state.lock() = state;
        outcome
    }
}
