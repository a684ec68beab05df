//! Precondition errors and the fault path for the panicking operations.

use crate::invariant_ppt::assert_invariant;

/// A violated precondition, reported by the checked (`try_*`) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    /// The operation needs insertion mode, but the machine is extracting.
    #[error("{operation} requires insertion mode")]
    NotInInsertionMode {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// The operation needs extraction mode, but the machine is inserting.
    #[error("{operation} requires extraction mode")]
    NotInExtractionMode {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// `remove_first` on an empty machine.
    #[error("remove_first on an empty machine")]
    Empty,
}

/// Record a precondition check under invariant `id`, faulting if it failed.
pub(crate) fn enforce<R>(check: Result<R, MachineError>, id: u32, context: &str) -> R {
    match check {
        Ok(value) => {
            assert_invariant(id, true, "precondition holds", Some(context));
            value
        }
        Err(err) => {
            assert_invariant(id, false, &err.to_string(), Some(context));
            unreachable!("failed invariant {} did not fault", id)
        }
    }
}
