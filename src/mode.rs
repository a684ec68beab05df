//! Machine mode definitions.

use crate::error::MachineError;
use std::fmt;

/// The two phases of a sorting machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Accepting elements via `add`.
    #[default]
    Insertion,
    /// Yielding elements via `remove_first`. Terminal.
    Extraction,
}

impl Mode {
    /// True in insertion mode.
    pub fn is_insertion(self) -> bool {
        self == Mode::Insertion
    }

    /// Precondition for operations that need insertion mode.
    pub fn require_insertion(self, operation: &'static str) -> Result<(), MachineError> {
        match self {
            Mode::Insertion => Ok(()),
            Mode::Extraction => Err(MachineError::NotInInsertionMode { operation }),
        }
    }

    /// Precondition for operations that need extraction mode.
    pub fn require_extraction(self, operation: &'static str) -> Result<(), MachineError> {
        match self {
            Mode::Extraction => Ok(()),
            Mode::Insertion => Err(MachineError::NotInExtractionMode { operation }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Insertion => write!(f, "insertion"),
            Mode::Extraction => write!(f, "extraction"),
        }
    }
}
