//! Correlation id issuance for the JSON-RPC binding.
//!
//! Ids come from a single atomic counter per client. Nothing else is
//! stored: each call awaits its own reply, so there is no table of
//! in-flight requests to maintain or clean up.

// ============================================================================
// Imports
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use crate::identifiers::RequestId;

// ============================================================================
// CorrelationManager
// ============================================================================

/// Issues strictly increasing [`RequestId`]s, starting at 1.
///
/// # Thread Safety
///
/// `next_id` is a single atomic increment; concurrent callers never
/// observe the same id.
#[derive(Debug, Default)]
pub struct CorrelationManager {
    counter: AtomicU64,
}

impl CorrelationManager {
    /// Creates a manager whose first id is 1.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Returns a fresh id greater than every id returned before.
    #[inline]
    pub fn next_id(&self) -> RequestId {
        RequestId::new(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Returns the most recently issued id, if any.
    #[inline]
    #[must_use]
    pub fn last_issued(&self) -> Option<RequestId> {
        match self.counter.load(Ordering::Relaxed) {
            0 => None,
            n => Some(RequestId::new(n)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
