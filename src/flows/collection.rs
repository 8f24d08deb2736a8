//! Owner's link collection (dashboard)
//!
//! The backend does not fix the wrapping of `/my-urls`, so decoding tries the
//! bare sequence, then the `{"urls": [...]}` record, and otherwise settles on
//! an empty collection. Fetch failures also render as empty; the dashboard
//! never shows an error banner.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::generation::{ActivationCounter, Generation, LoadOutcome};
use super::{Activation, derive_short_url, expire_session};
use crate::api::ApiClient;
use crate::api::constants::MY_URLS_PATH;
use crate::errors::ClientError;
use crate::models::ShortLink;
use crate::session::{Access, Route, SessionGuard};

/// Recognized shapes of the `/my-urls` body
#[derive(Debug, Clone, PartialEq)]
pub enum LinksPayload {
    /// `[ {...}, ... ]`
    Bare(Vec<ShortLink>),
    /// `{ "urls": [ {...}, ... ], ... }`
    Wrapped { urls: Vec<ShortLink> },
}

impl LinksPayload {
    /// `None` when the body matches neither shape
    pub fn decode(value: &Value) -> Option<Self> {
        decode_bare(value)
            .map(LinksPayload::Bare)
            .or_else(|| decode_wrapped(value).map(|urls| LinksPayload::Wrapped { urls }))
    }

    pub fn into_links(self) -> Vec<ShortLink> {
        match self {
            LinksPayload::Bare(links) => links,
            LinksPayload::Wrapped { urls } => urls,
        }
    }
}

/// The body itself is the collection
pub fn decode_bare(value: &Value) -> Option<Vec<ShortLink>> {
    if !value.is_array() {
        return None;
    }
    Vec::<ShortLink>::deserialize(value).ok()
}

/// The collection sits under a sequence-valued `urls` field
pub fn decode_wrapped(value: &Value) -> Option<Vec<ShortLink>> {
    let urls = value.as_object()?.get("urls")?;
    if !urls.is_array() {
        return None;
    }
    Vec::<ShortLink>::deserialize(urls).ok()
}

/// Map any `/my-urls` body onto the local collection, order preserved
pub fn normalize_links(value: Value) -> Vec<ShortLink> {
    match LinksPayload::decode(&value) {
        Some(payload) => payload.into_links(),
        None => {
            let err = ClientError::shape(format!(
                "unrecognized link collection body: {}",
                describe(&value)
            ));
            debug!("{}, rendering empty collection", err);
            Vec::new()
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence with malformed entries",
        Value::Object(map) if map.contains_key("urls") => "record with non-sequence `urls`",
        Value::Object(_) => "record without `urls`",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Ready(Vec<ShortLink>),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }

    /// Links to render; empty while loading
    pub fn links(&self) -> &[ShortLink] {
        match self {
            DashboardState::Loading => &[],
            DashboardState::Ready(links) => links,
        }
    }
}

struct DashboardInner {
    api: Arc<ApiClient>,
    public_base_url: String,
    counter: ActivationCounter,
    state: Mutex<DashboardState>,
    /// id → clicks from the last applied snapshot
    last_clicks: Mutex<HashMap<i64, u64>>,
}

/// Dashboard view handle; clones share the same state.
#[derive(Clone)]
pub struct DashboardView {
    inner: Arc<DashboardInner>,
}

impl DashboardView {
    pub fn new(api: Arc<ApiClient>, public_base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(DashboardInner {
                api,
                public_base_url: public_base_url.into(),
                counter: ActivationCounter::new(),
                state: Mutex::new(DashboardState::Loading),
                last_clicks: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.inner.state.lock().clone()
    }

    /// Activate the view: redirect without a credential, otherwise start
    /// exactly one fetch in the background. Must run inside a Tokio runtime.
    pub fn activate(&self) -> Activation {
        match SessionGuard::check(self.inner.api.session()) {
            Access::Redirect(route) => Activation::Redirect(route),
            Access::Granted(_) => {
                let generation = self.inner.counter.advance();
                *self.inner.state.lock() = DashboardState::Loading;
                let view = self.clone();
                Activation::Started(tokio::spawn(
                    async move { view.load_links(generation).await },
                ))
            }
        }
    }

    /// Fetch and apply the collection for `generation`
    pub async fn load_links(&self, generation: Generation) -> LoadOutcome {
        let result = self.inner.api.get(MY_URLS_PATH).await;

        if !self.inner.counter.is_current(generation) {
            debug!(
                "Discarding link collection for stale activation {}",
                generation.value()
            );
            return LoadOutcome::Discarded;
        }

        // 只有成功解码的快照才作为点击数基线
        let (mut links, outcome, decoded) = match result {
            Ok(body) => match LinksPayload::decode(&body) {
                Some(payload) => (payload.into_links(), LoadOutcome::Applied, true),
                None => (normalize_links(body), LoadOutcome::Applied, false),
            },
            Err(e) => {
                warn!("Failed to fetch links: {}", e);
                if e.is_unauthorized() {
                    expire_session(self.inner.api.session());
                    (Vec::new(), LoadOutcome::SessionExpired, false)
                } else {
                    (Vec::new(), LoadOutcome::Applied, false)
                }
            }
        };

        for link in links.iter_mut().filter(|l| l.short_url.is_empty()) {
            link.short_url = derive_short_url(&self.inner.public_base_url, &link.short_code);
        }
        if decoded {
            self.watch_clicks(&links);
        }

        *self.inner.state.lock() = DashboardState::Ready(links);
        outcome
    }

    /// Clear the credential; the current activation's result is dropped.
    pub fn logout(&self) -> Route {
        self.inner.counter.advance();
        SessionGuard::logout(self.inner.api.session())
    }

    /// Compare against the previous decoded snapshot and make `links` the new
    /// baseline. Returns the ids whose click count went down.
    pub(crate) fn watch_clicks(&self, links: &[ShortLink]) -> Vec<i64> {
        let mut last = self.inner.last_clicks.lock();
        let mut decreased = Vec::new();
        for link in links {
            if let Some(&before) = last.get(&link.id)
                && link.clicks < before
            {
                warn!(
                    "Click count for /{} went down ({} -> {})",
                    link.short_code, before, link.clicks
                );
                decreased.push(link.id);
            }
        }
        *last = links.iter().map(|l| (l.id, l.clicks)).collect();
        decreased
    }

    #[cfg(test)]
    fn click_baseline(&self) -> HashMap<i64, u64> {
        self.inner.last_clicks.lock().clone()
    }
}
