//! Account flows: login, register, profile and logout
//!
//! Successful login/register persists the returned token as the session
//! credential; nothing else in the client writes it.

use std::sync::Arc;

use tracing::{info, warn};

use super::expire_session;
use crate::api::ApiClient;
use crate::api::constants::{LOGIN_PATH, PROFILE_PATH, REGISTER_PATH};
use crate::errors::{ClientError, Result};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::session::{Access, Route, SessionGuard};

/// Result of loading the signed-in account
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    Found(User),
    /// No credential, or the backend rejected it (the credential is cleared)
    Redirect(Route),
}

pub struct AuthFlow {
    api: Arc<ApiClient>,
}

impl AuthFlow {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self
            .api
            .post_as(LOGIN_PATH, &request)
            .await
            .inspect_err(|e| warn!("Login request failed: {}", e))?;
        self.api.session().sign_in(resp.token)?;
        info!("Logged in as {}", resp.user.username);
        Ok(resp.user)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation(
                "username, email and password are required",
            ));
        }
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self
            .api
            .post_as(REGISTER_PATH, &request)
            .await
            .inspect_err(|e| warn!("Register request failed: {}", e))?;
        self.api.session().sign_in(resp.token)?;
        info!("Registered and logged in as {}", resp.user.username);
        Ok(resp.user)
    }

    pub async fn profile(&self) -> Result<ProfileOutcome> {
        if let Access::Redirect(route) = SessionGuard::check(self.api.session()) {
            return Ok(ProfileOutcome::Redirect(route));
        }
        match self.api.get_as::<User>(PROFILE_PATH).await {
            Ok(user) => Ok(ProfileOutcome::Found(user)),
            Err(e) if e.is_unauthorized() => {
                warn!("Profile request rejected: {}", e);
                expire_session(self.api.session());
                Ok(ProfileOutcome::Redirect(Route::Login))
            }
            Err(e) => {
                warn!("Profile request failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn logout(&self) -> Route {
        SessionGuard::logout(self.api.session())
    }
}
