//! Link creation flow
//!
//! ```text
//! idle ──submit──▶ submitting ──ok──▶ succeeded(short_url)
//!                      └──────err──▶ failed(message)
//! ```
//!
//! Both terminal states go back through `submitting` on the next submit,
//! which also clears the copy confirmation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::clipboard::{ClipboardProvider, CopyIndicator};
use crate::api::ApiClient;
use crate::api::constants::SHORTEN_PATH;
use crate::errors::ClientError;
use crate::models::{ShortenRequest, ShortenResponse};
use crate::utils::url_validator::validate_url;

/// Shown when the backend gave no usable message
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(ShortenResponse),
    Failed(String),
}

impl SubmissionState {
    pub fn short_url(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded(resp) => Some(&resp.short_url),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// User-facing text for a failed call: the backend's `error` field, else the
/// generic fallback. Validation messages are already user-facing.
pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Validation(msg) => msg.clone(),
        _ => err
            .api_message()
            .map(String::from)
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
    }
}

pub struct CreationFlow {
    api: Arc<ApiClient>,
    clipboard: Arc<dyn ClipboardProvider>,
    state: SubmissionState,
    copy: CopyIndicator,
}

impl CreationFlow {
    pub fn new(
        api: Arc<ApiClient>,
        clipboard: Arc<dyn ClipboardProvider>,
        copy_window: Duration,
    ) -> Self {
        Self {
            api,
            clipboard,
            state: SubmissionState::Idle,
            copy: CopyIndicator::new(copy_window),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    pub fn is_copied(&self) -> bool {
        self.copy.is_copied()
    }

    /// Whether to point the visitor at the dashboard or at login
    pub fn is_signed_in(&self) -> bool {
        self.api.session().is_signed_in()
    }

    /// Submit a URL for shortening.
    ///
    /// Input that fails URL validation never reaches the backend.
    pub async fn submit(&mut self, request: impl Into<ShortenRequest>) -> &SubmissionState {
        self.state = SubmissionState::Submitting;
        self.copy.reset();

        let mut request = request.into();
        request.url = request.url.trim().to_string();

        if let Err(e) = validate_url(&request.url) {
            self.state = SubmissionState::Failed(e.to_string());
            return &self.state;
        }

        self.state = match self
            .api
            .post_as::<_, ShortenResponse>(SHORTEN_PATH, &request)
            .await
        {
            Ok(resp) => {
                info!("Short link created: {}", resp.short_url);
                SubmissionState::Succeeded(resp)
            }
            Err(e) => {
                warn!("Shorten request failed: {}", e);
                SubmissionState::Failed(failure_message(&e))
            }
        };
        &self.state
    }

    /// Copy the current short URL, if there is one
    pub fn copy_short_url(&mut self) -> bool {
        let Some(short_url) = self.state.short_url().map(String::from) else {
            return false;
        };
        self.copy_to_clipboard(&short_url)
    }

    /// Write `value` to the clipboard; failures are logged, never surfaced.
    pub fn copy_to_clipboard(&mut self, value: &str) -> bool {
        match self.clipboard.write_text(value) {
            Ok(()) => {
                self.copy.mark();
                true
            }
            Err(e) => {
                warn!("Failed to copy via {} clipboard: {}", self.clipboard.name(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_message_prefers_backend_error() {
        let err = ClientError::api(400, Some(json!({"error": "bad url"})));
        assert_eq!(failure_message(&err), "bad url");
    }

    #[test]
    fn test_failure_message_falls_back() {
        assert_eq!(
            failure_message(&ClientError::api(500, None)),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            failure_message(&ClientError::api(502, Some(json!("<html>")))),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            failure_message(&ClientError::network("connection refused")),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            failure_message(&ClientError::shape("missing field `short_url`")),
            GENERIC_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_state_accessors() {
        let ok = SubmissionState::Succeeded(ShortenResponse {
            short_url: "https://x/abc".into(),
            short_code: None,
            original_url: None,
            expires_at: None,
        });
        assert_eq!(ok.short_url(), Some("https://x/abc"));
        assert_eq!(ok.error_message(), None);

        let failed = SubmissionState::Failed("nope".into());
        assert_eq!(failed.short_url(), None);
        assert_eq!(failed.error_message(), Some("nope"));
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
    }
}
