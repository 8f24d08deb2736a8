//! Owner session
//!
//! The credential lives behind an explicit [`SessionContext`] that is handed
//! to the API client and to every owner-only view, instead of being read from
//! ambient global storage.
//!
//! ```text
//! view activation → SessionGuard::check ─→ Access::Redirect(Route::Login)
//!                                        └→ Access::Granted → fetch (once)
//! ```

mod context;
mod credential;
mod guard;
mod store;

pub use context::SessionContext;
pub use credential::Credential;
pub use guard::{Access, Route, SessionGuard};
pub use store::{CREDENTIAL_KEY, CredentialStore, FileCredentialStore, MemoryCredentialStore};
