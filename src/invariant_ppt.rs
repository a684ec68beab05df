//! PPT Invariant System: precondition and structural invariants with contract tracking.
//!
//! Every operation on a machine checks its preconditions through
//! [`assert_invariant`]. A failed check is a programmer error and panics; a
//! passing check is recorded (feature `ppt`) so [`contract_test`] can prove
//! the check was actually exercised.

#[cfg(feature = "ppt")]
use lazy_static::lazy_static;
#[cfg(feature = "ppt")]
use std::collections::HashSet;
#[cfg(feature = "ppt")]
use std::sync::Mutex;

// Invariant constants for contract tracking
pub const ADD_IN_INSERTION_MODE: u32 = 1;
pub const SINGLE_MODE_TRANSITION: u32 = 2;
pub const REMOVE_IN_EXTRACTION_MODE: u32 = 3;
pub const REMOVE_FROM_NONEMPTY: u32 = 4;
pub const HEAP_ORDER: u32 = 5;
pub const TRANSITION_PRESERVES_SIZE: u32 = 6;
pub const SIZE_ACCOUNTING: u32 = 7;
pub const DRAIN_IN_EXTRACTION_MODE: u32 = 8;

#[cfg(feature = "ppt")]
lazy_static! {
    static ref INVARIANT_LOG: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[cfg(feature = "ppt")]
/// Assert an invariant: logs it and panics on failure.
pub(crate) fn assert_invariant(id: u32, condition: bool, message: &str, context: Option<&str>) {
    if !condition {
        let full_message = if let Some(ctx) = context {
            format!("Invariant {} ({}) failed: {} (context: {})", id, invariant_name(id), message, ctx)
        } else {
            format!("Invariant {} ({}) failed: {}", id, invariant_name(id), message)
        };
        log::error!("{}", full_message);
        panic!("{}", full_message);
    }
    INVARIANT_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(id);
}

#[cfg(not(feature = "ppt"))]
/// Assert an invariant: checks condition and panics on failure.
pub(crate) fn assert_invariant(_id: u32, condition: bool, message: &str, _context: Option<&str>) {
    if !condition {
        panic!("Invariant failed: {}", message);
    }
}

/// Maps invariant ID to human-readable name (for diagnostics only).
pub const fn invariant_name(id: u32) -> &'static str {
    match id {
        ADD_IN_INSERTION_MODE => "ADD_IN_INSERTION_MODE",
        SINGLE_MODE_TRANSITION => "SINGLE_MODE_TRANSITION",
        REMOVE_IN_EXTRACTION_MODE => "REMOVE_IN_EXTRACTION_MODE",
        REMOVE_FROM_NONEMPTY => "REMOVE_FROM_NONEMPTY",
        HEAP_ORDER => "HEAP_ORDER",
        TRANSITION_PRESERVES_SIZE => "TRANSITION_PRESERVES_SIZE",
        SIZE_ACCOUNTING => "SIZE_ACCOUNTING",
        DRAIN_IN_EXTRACTION_MODE => "DRAIN_IN_EXTRACTION_MODE",
        _ => "UNKNOWN",
    }
}

#[cfg(feature = "ppt")]
/// Contract test: checks that specified invariants were asserted.
pub fn contract_test(test_name: &str, required_invariants: &[u32]) {
    let log = INVARIANT_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut missing = Vec::new();
    for &inv in required_invariants {
        if !log.contains(&inv) {
            missing.push(invariant_name(inv));
        }
    }
    drop(log); // Drop the lock before panicking
    if !missing.is_empty() {
        panic!(
            "Contract test '{}' failed: invariants not enforced: {:?}",
            test_name, missing
        );
    }
}

#[cfg(not(feature = "ppt"))]
/// Contract test: no-op when PPT feature is disabled.
pub fn contract_test(_test_name: &str, _required_invariants: &[u32]) {}

#[cfg(feature = "ppt")]
/// Clear invariant log (for between test runs).
pub fn clear_invariant_log() {
    INVARIANT_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
}

#[cfg(not(feature = "ppt"))]
/// Clear invariant log: no-op when PPT feature is disabled.
pub fn clear_invariant_log() {}
