//! The drag-operation-active flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-wide flag that suppresses background refresh while a mutating
/// operation is in flight.
///
/// The flag must be raised before the first store mutation of a drag or
/// batch operation and released on every exit path; [`RefreshGate::hold`]
/// returns an RAII guard so release also happens on early return and
/// panic unwind. Holds are counted, so a batch operation may hold the
/// gate around an inner move that holds it again.
#[derive(Debug, Clone, Default)]
pub struct RefreshGate {
    holds: Arc<AtomicUsize>,
}

impl RefreshGate {
    /// Create an inactive gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any mutating operation currently holds the gate.
    pub fn is_active(&self) -> bool {
        self.holds.load(Ordering::SeqCst) > 0
    }

    /// Raise the flag for the lifetime of the returned guard.
    pub fn hold(&self) -> GateGuard {
        self.holds.fetch_add(1, Ordering::SeqCst);
        GateGuard {
            holds: Arc::clone(&self.holds),
        }
    }
}

/// RAII guard lowering the flag when dropped.
#[derive(Debug)]
pub struct GateGuard {
    holds: Arc<AtomicUsize>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.holds.fetch_sub(1, Ordering::SeqCst);
    }
}
