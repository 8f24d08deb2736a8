use std::sync::Arc;

use tracing::{info, warn};

use super::{Credential, CredentialStore, MemoryCredentialStore};
use crate::errors::{ClientError, Result};

/// Explicit session context shared by the API client and protected views.
///
/// Every read goes to the backing store, so a credential removed elsewhere
/// (logout) is observed by the next view activation and the next request.
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Context backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Current credential, if any.
    ///
    /// An unreadable store is treated as signed out.
    pub fn credential(&self) -> Option<Credential> {
        match self.store.load() {
            Ok(cred) => cred,
            Err(e) => {
                warn!("Failed to read credential from {} store: {}", self.store.name(), e);
                None
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.credential().is_some()
    }

    /// Persist a freshly issued token
    pub fn sign_in(&self, token: impl Into<String>) -> Result<Credential> {
        let credential = Credential::new(token)
            .ok_or_else(|| ClientError::validation("received an empty token"))?;
        self.store.save(&credential)?;
        info!("Signed in");
        Ok(credential)
    }

    /// Remove the credential (logout, or rejected by the backend)
    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()?;
        info!("Signed out");
        Ok(())
    }
}
