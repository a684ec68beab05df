//! Builder API: construct a machine with initial entries and mode.

use crate::machine::{InsertionStrategy, SortingMachine};
use crate::mode::Mode;
use crate::order::Order;
use crate::reference::ReferenceMachine;

/// Builds a machine holding `entries` in the requested mode.
///
/// Entries are added in order, then the mode switch happens if extraction
/// mode was requested.
#[derive(Debug, Clone)]
pub struct MachineBuilder<T, O> {
    order: O,
    entries: Vec<T>,
    mode: Mode,
    strategy: InsertionStrategy,
}

impl<T, O: Order<T>> MachineBuilder<T, O> {
    /// Start a builder for an empty insertion-mode machine.
    pub fn new(order: O) -> Self {
        Self {
            order,
            entries: Vec::new(),
            mode: Mode::Insertion,
            strategy: InsertionStrategy::default(),
        }
    }

    /// Append initial entries.
    pub fn entries<I: IntoIterator<Item = T>>(mut self, entries: I) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Finish in the given mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Finish in extraction mode.
    pub fn extraction_mode(self) -> Self {
        self.mode(Mode::Extraction)
    }

    /// Insertion strategy for the built [`SortingMachine`].
    pub fn strategy(mut self, strategy: InsertionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Build the heap-backed machine.
    pub fn build(self) -> SortingMachine<T, O> {
        let mut machine = SortingMachine::with_strategy(self.order, self.strategy);
        machine.extend(self.entries);
        if self.mode == Mode::Extraction {
            machine.change_to_extraction_mode();
        }
        machine
    }

    /// Build the reference machine with the same state.
    pub fn build_reference(self) -> ReferenceMachine<T, O> {
        let mut machine = ReferenceMachine::new(self.order);
        for x in self.entries {
            machine.add(x);
        }
        if self.mode == Mode::Extraction {
            machine.change_to_extraction_mode();
        }
        machine
    }
}
