use std::fmt;

use tracing::debug;

use super::{Credential, SessionContext};

/// Views of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Link creation (root)
    Create,
    /// Owner's link collection
    Dashboard,
    /// Single-link statistics
    Stats(String),
    /// Unauthenticated redirect target
    Login,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Create => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Stats(code) => format!("/stats/{}", code),
            Route::Login => "/login".to_string(),
        }
    }

    pub fn is_owner_only(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Stats(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Result of checking the session on view activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Credential),
    Redirect(Route),
}

/// Advisory gate for owner-only views.
///
/// Only checks presence; token validity is left to the backend.
pub struct SessionGuard;

impl SessionGuard {
    /// Synchronous presence check performed before any fetch
    pub fn check(session: &SessionContext) -> Access {
        match session.credential() {
            Some(cred) => Access::Granted(cred),
            None => {
                debug!("No credential, redirecting to {}", Route::Login);
                Access::Redirect(Route::Login)
            }
        }
    }

    /// Clear the credential and return the redirect target.
    ///
    /// A storage failure still redirects; the error is only logged.
    pub fn logout(session: &SessionContext) -> Route {
        if let Err(e) = session.sign_out() {
            tracing::warn!("Failed to clear credential on logout: {}", e);
        }
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_without_credential_redirects() {
        let session = SessionContext::in_memory();
        assert_eq!(SessionGuard::check(&session), Access::Redirect(Route::Login));
    }

    #[test]
    fn test_check_with_credential_grants() {
        let session = SessionContext::in_memory();
        session.sign_in("tok").unwrap();
        assert!(matches!(SessionGuard::check(&session), Access::Granted(_)));
    }

    #[test]
    fn test_logout_clears_and_redirects() {
        let session = SessionContext::in_memory();
        session.sign_in("tok").unwrap();
        assert_eq!(SessionGuard::logout(&session), Route::Login);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Stats("abc".into()).path(), "/stats/abc");
        assert!(Route::Dashboard.is_owner_only());
        assert!(!Route::Create.is_owner_only());
        assert!(!Route::Login.is_owner_only());
    }
}
