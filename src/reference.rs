//! Reference sorting machine: the obvious algorithm, used as a test oracle.
//!
//! Entries are kept in arrival order until the mode switch, then sorted once
//! (largest first) so `remove_first` pops from the tail.

#![warn(missing_docs)]

use crate::error::{enforce, MachineError};
use crate::invariant_ppt::{
    ADD_IN_INSERTION_MODE, REMOVE_FROM_NONEMPTY, REMOVE_IN_EXTRACTION_MODE,
    SINGLE_MODE_TRANSITION,
};
use crate::kernel::SortingMachineKernel;
use crate::mode::Mode;
use crate::multiset;
use crate::order::Order;

/// A sort-on-switch sorting machine with the same contract as
/// [`SortingMachine`](crate::machine::SortingMachine).
#[derive(Debug, Clone)]
pub struct ReferenceMachine<T, O> {
    entries: Vec<T>,
    mode: Mode,
    order: O,
}

impl<T, O: Order<T>> ReferenceMachine<T, O> {
    /// Create an empty machine in insertion mode.
    pub fn new(order: O) -> Self {
        Self {
            entries: Vec::new(),
            mode: Mode::Insertion,
            order,
        }
    }

    /// Add `x`; faults in extraction mode.
    pub fn add(&mut self, x: T) {
        enforce(self.try_add(x), ADD_IN_INSERTION_MODE, "add")
    }

    /// Checked [`add`](Self::add).
    pub fn try_add(&mut self, x: T) -> Result<(), MachineError> {
        self.mode.require_insertion("add")?;
        self.entries.push(x);
        Ok(())
    }

    /// Sort the entries and switch to extraction mode; faults if already switched.
    pub fn change_to_extraction_mode(&mut self) {
        enforce(
            self.try_change_to_extraction_mode(),
            SINGLE_MODE_TRANSITION,
            "change_to_extraction_mode",
        )
    }

    /// Checked [`change_to_extraction_mode`](Self::change_to_extraction_mode).
    pub fn try_change_to_extraction_mode(&mut self) -> Result<(), MachineError> {
        self.mode.require_insertion("change_to_extraction_mode")?;
        let order = &self.order;
        self.entries.sort_by(|a, b| order.compare(b, a));
        self.mode = Mode::Extraction;
        Ok(())
    }

    /// Remove a minimal element; faults in insertion mode or when empty.
    pub fn remove_first(&mut self) -> T {
        enforce(
            self.mode.require_extraction("remove_first"),
            REMOVE_IN_EXTRACTION_MODE,
            "remove_first",
        );
        enforce(self.try_remove_first(), REMOVE_FROM_NONEMPTY, "remove_first")
    }

    /// Checked [`remove_first`](Self::remove_first).
    pub fn try_remove_first(&mut self) -> Result<T, MachineError> {
        self.mode.require_extraction("remove_first")?;
        self.entries.pop().ok_or(MachineError::Empty)
    }
}

impl<T, O> ReferenceMachine<T, O> {
    /// True while the machine accepts `add`.
    pub fn is_in_insertion_mode(&self) -> bool {
        self.mode.is_insertion()
    }

    /// The order fixed at construction.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Number of elements held.
    pub fn size(&self) -> usize {
        self.entries.len()
    }
}

impl<T: PartialEq, O: PartialEq> PartialEq for ReferenceMachine<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.order == other.order
            && multiset::eq(&self.entries, &other.entries)
    }
}

impl<T, O: Order<T>> SortingMachineKernel<T> for ReferenceMachine<T, O> {
    type Order = O;

    fn try_add(&mut self, x: T) -> Result<(), MachineError> {
        ReferenceMachine::try_add(self, x)
    }

    fn try_change_to_extraction_mode(&mut self) -> Result<(), MachineError> {
        ReferenceMachine::try_change_to_extraction_mode(self)
    }

    fn try_remove_first(&mut self) -> Result<T, MachineError> {
        ReferenceMachine::try_remove_first(self)
    }

    fn is_in_insertion_mode(&self) -> bool {
        self.mode.is_insertion()
    }

    fn order(&self) -> &O {
        &self.order
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> &[T] {
        &self.entries
    }
}
