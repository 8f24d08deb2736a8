//! Request-generation tokens
//!
//! Every view activation takes a new [`Generation`]. A fetch started under an
//! older generation may still complete, but its result is discarded instead of
//! overwriting the newer activation's state.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ActivationCounter {
    current: AtomicU64,
}

impl ActivationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new activation, invalidating all earlier generations
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::Acquire))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }
}

/// How a view fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Result written to the view state
    Applied,
    /// A newer activation superseded this one; result dropped
    Discarded,
    /// Backend rejected the credential; it has been cleared
    SessionExpired,
}
