//! Machine module: the heap-backed sorting machine.
//!
//! A [`SortingMachine`] collects elements in insertion mode, switches once to
//! extraction mode, and then hands elements back in nondecreasing order
//! under its [`Order`].
//!
//! ```
//! use sorting_machine::machine::SortingMachine;
//! use sorting_machine::order::CaseInsensitive;
//!
//! let mut m = SortingMachine::new(CaseInsensitive);
//! m.add("beer");
//! m.add("apple");
//! m.change_to_extraction_mode();
//! assert_eq!(m.remove_first(), "apple");
//! assert_eq!(m.remove_first(), "beer");
//! assert_eq!(m.size(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use crate::error::{enforce, MachineError};
use crate::heap;
use crate::invariant_ppt::{
    assert_invariant, ADD_IN_INSERTION_MODE, DRAIN_IN_EXTRACTION_MODE, HEAP_ORDER,
    REMOVE_FROM_NONEMPTY, REMOVE_IN_EXTRACTION_MODE, SINGLE_MODE_TRANSITION, SIZE_ACCOUNTING,
    TRANSITION_PRESERVES_SIZE,
};
use crate::kernel::SortingMachineKernel;
use crate::mode::Mode;
use crate::multiset;
use crate::order::Order;
use std::fmt;

/// How `add` treats the storage while in insertion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionStrategy {
    /// Append in O(1); heapify once on the mode switch.
    #[default]
    Deferred,
    /// Sift each new element up, keeping a valid heap at all times. The mode
    /// switch then only flips the flag.
    Incremental,
}

/// A multiset that is filled in insertion mode and drained in order in
/// extraction mode.
#[derive(Debug, Clone)]
pub struct SortingMachine<T, O> {
    entries: Vec<T>,
    mode: Mode,
    order: O,
    strategy: InsertionStrategy,
}

impl<T, O: Order<T>> SortingMachine<T, O> {
    /// Create an empty machine in insertion mode.
    pub fn new(order: O) -> Self {
        Self::with_strategy(order, InsertionStrategy::default())
    }

    /// Create an empty machine with room for `capacity` elements.
    pub fn with_capacity(order: O, capacity: usize) -> Self {
        let mut machine = Self::new(order);
        machine.entries.reserve(capacity);
        machine
    }

    /// Create an empty machine using the given insertion strategy.
    pub fn with_strategy(order: O, strategy: InsertionStrategy) -> Self {
        Self {
            entries: Vec::new(),
            mode: Mode::Insertion,
            order,
            strategy,
        }
    }

    /// Add `x` to the multiset.
    ///
    /// # Panics
    /// Panics if the machine is in extraction mode.
    pub fn add(&mut self, x: T) {
        enforce(self.try_add(x), ADD_IN_INSERTION_MODE, "add")
    }

    /// Checked [`add`](Self::add). On error `x` is dropped.
    pub fn try_add(&mut self, x: T) -> Result<(), MachineError> {
        self.mode.require_insertion("add")?;
        let before = self.entries.len();
        match self.strategy {
            InsertionStrategy::Deferred => self.entries.push(x),
            InsertionStrategy::Incremental => heap::push(&mut self.entries, x, &self.order),
        }
        assert_invariant(
            SIZE_ACCOUNTING,
            self.entries.len() == before + 1,
            "add grows size by one",
            Some("add"),
        );
        log::trace!("add: {} entries", self.entries.len());
        Ok(())
    }

    /// Switch to extraction mode, arranging the entries into a heap.
    ///
    /// # Panics
    /// Panics if the machine is already in extraction mode.
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
        let size = self.entries.len();
        if self.strategy == InsertionStrategy::Deferred {
            heap::heapify(&mut self.entries, &self.order);
        }
        self.mode = Mode::Extraction;
        log::debug!(
            "switched to extraction mode with {} entries ({:?} insertion)",
            size,
            self.strategy
        );
        assert_invariant(
            HEAP_ORDER,
            heap::is_heap(&self.entries, &self.order),
            "entries form a min-heap",
            Some("change_to_extraction_mode"),
        );
        assert_invariant(
            TRANSITION_PRESERVES_SIZE,
            self.entries.len() == size,
            "mode switch keeps every entry",
            Some("change_to_extraction_mode"),
        );
        Ok(())
    }

    /// Remove and return a minimal element.
    ///
    /// Among order-equivalent minima, whichever sits at the heap root wins.
    ///
    /// # Panics
    /// Panics in insertion mode or when the machine is empty.
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
        let first = heap::pop_min(&mut self.entries, &self.order).ok_or(MachineError::Empty)?;
        log::trace!("remove_first: {} entries left", self.entries.len());
        Ok(first)
    }

    /// Iterator that calls `remove_first` until the machine is empty.
    ///
    /// # Panics
    /// Panics in insertion mode.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, O> {
        enforce(
            self.mode.require_extraction("drain_sorted"),
            DRAIN_IN_EXTRACTION_MODE,
            "drain_sorted",
        );
        DrainSorted { machine: self }
    }

    /// Consume the machine, returning every element in nondecreasing order.
    ///
    /// Switches to extraction mode first if needed.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        if self.mode.is_insertion() {
            self.change_to_extraction_mode();
        }
        self.drain_sorted().collect()
    }
}

impl<T, O> SortingMachine<T, O> {
    /// True while the machine accepts `add`.
    pub fn is_in_insertion_mode(&self) -> bool {
        self.mode.is_insertion()
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The order fixed at construction.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Number of elements held.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// The insertion strategy fixed at construction.
    pub fn strategy(&self) -> InsertionStrategy {
        self.strategy
    }

    /// Iterate the held elements in unspecified order, without removing them.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Drop every element and return to insertion mode. The order is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.mode = Mode::Insertion;
    }

    /// A fresh, empty machine with the same order and strategy.
    pub fn new_instance(&self) -> Self
    where
        O: Clone,
    {
        Self {
            entries: Vec::new(),
            mode: Mode::Insertion,
            order: self.order.clone(),
            strategy: self.strategy,
        }
    }

    /// Take over `source`'s state, leaving `source` as a fresh instance.
    pub fn transfer_from(&mut self, source: &mut Self)
    where
        O: Clone,
    {
        let fresh = source.new_instance();
        *self = std::mem::replace(source, fresh);
    }
}

impl<T: PartialEq, O: PartialEq> PartialEq for SortingMachine<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.order == other.order
            && multiset::eq(&self.entries, &other.entries)
    }
}

impl<T: Eq, O: Eq> Eq for SortingMachine<T, O> {}

impl<T: fmt::Display, O> fmt::Display for SortingMachine<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {{", self.mode)?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "}})")
    }
}

impl<T, O: Order<T>> Extend<T> for SortingMachine<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl<'a, T, O> IntoIterator for &'a SortingMachine<T, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O: Order<T>> SortingMachineKernel<T> for SortingMachine<T, O> {
    type Order = O;

    fn try_add(&mut self, x: T) -> Result<(), MachineError> {
        SortingMachine::try_add(self, x)
    }

    fn try_change_to_extraction_mode(&mut self) -> Result<(), MachineError> {
        SortingMachine::try_change_to_extraction_mode(self)
    }

    fn try_remove_first(&mut self) -> Result<T, MachineError> {
        SortingMachine::try_remove_first(self)
    }

    fn is_in_insertion_mode(&self) -> bool {
        SortingMachine::is_in_insertion_mode(self)
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

/// Draining iterator returned by [`SortingMachine::drain_sorted`].
#[derive(Debug)]
pub struct DrainSorted<'a, T, O> {
    machine: &'a mut SortingMachine<T, O>,
}

impl<T, O: Order<T>> Iterator for DrainSorted<'_, T, O> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.machine.try_remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.machine.size();
        (n, Some(n))
    }
}

impl<T, O: Order<T>> ExactSizeIterator for DrainSorted<'_, T, O> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{CaseInsensitive, Natural};
    use proptest::prelude::*;

    #[test]
    fn new_machine_is_empty_insertion() {
        let m: SortingMachine<&str, _> = SortingMachine::new(CaseInsensitive);
        assert!(m.is_in_insertion_mode());
        assert_eq!(m.size(), 0);
        assert_eq!(*m.order(), CaseInsensitive);
        assert_eq!(m.strategy(), InsertionStrategy::Deferred);
    }

    #[test]
    fn add_then_extract_in_order() {
        let mut m = SortingMachine::new(Natural);
        m.extend([5, 3, 9, 1, 3]);
        assert_eq!(m.size(), 5);
        m.change_to_extraction_mode();
        assert!(!m.is_in_insertion_mode());
        let out: Vec<_> = m.drain_sorted().collect();
        assert_eq!(out, vec![1, 3, 3, 5, 9]);
        assert_eq!(m.size(), 0);
    }

    #[test]
    fn incremental_strategy_matches_deferred() {
        let mut deferred = SortingMachine::new(Natural);
        let mut incremental = SortingMachine::with_strategy(Natural, InsertionStrategy::Incremental);
        for x in [4, 8, 1, 1, 7, 0] {
            deferred.add(x);
            incremental.add(x);
        }
        assert_eq!(deferred, incremental);
        assert_eq!(deferred.into_sorted_vec(), incremental.into_sorted_vec());
    }

    #[test]
    fn equality_ignores_arrangement() {
        let mut a = SortingMachine::new(Natural);
        let mut b = SortingMachine::new(Natural);
        a.extend([1, 2, 3]);
        b.extend([3, 1, 2]);
        assert_eq!(a, b);
        b.change_to_extraction_mode();
        assert_ne!(a, b);
        a.change_to_extraction_mode();
        assert_eq!(a, b);
    }

    #[test]
    fn display_shows_mode_and_entries() {
        let mut m = SortingMachine::new(CaseInsensitive);
        assert_eq!(m.to_string(), "(insertion, {})");
        m.add("a");
        m.add("b");
        assert_eq!(m.to_string(), "(insertion, {a, b})");
        m.change_to_extraction_mode();
        assert_eq!(m.to_string(), "(extraction, {a, b})");
    }

    #[test]
    fn clear_resets_mode() {
        let mut m = SortingMachine::new(Natural);
        m.extend([2, 1]);
        m.change_to_extraction_mode();
        m.clear();
        assert!(m.is_in_insertion_mode());
        assert_eq!(m.size(), 0);
        m.add(4);
        assert_eq!(m.size(), 1);
    }

    #[test]
    fn transfer_from_moves_state() {
        let mut source = SortingMachine::new(Natural);
        source.extend([3, 1]);
        source.change_to_extraction_mode();
        let mut dest = source.new_instance();
        dest.add(10);
        dest.transfer_from(&mut source);
        assert_eq!(dest.size(), 2);
        assert!(!dest.is_in_insertion_mode());
        assert_eq!(source.size(), 0);
        assert!(source.is_in_insertion_mode());
        assert_eq!(dest.remove_first(), 1);
    }

    #[test]
    fn checked_operations_report_errors() {
        let mut m = SortingMachine::new(Natural);
        assert_eq!(
            m.try_remove_first(),
            Err(MachineError::NotInExtractionMode { operation: "remove_first" })
        );
        m.try_add(1).unwrap();
        m.try_change_to_extraction_mode().unwrap();
        assert_eq!(
            m.try_change_to_extraction_mode(),
            Err(MachineError::NotInInsertionMode { operation: "change_to_extraction_mode" })
        );
        assert_eq!(
            m.try_add(2),
            Err(MachineError::NotInInsertionMode { operation: "add" })
        );
        assert_eq!(m.try_remove_first(), Ok(1));
        assert_eq!(m.try_remove_first(), Err(MachineError::Empty));
    }

    #[test]
    fn iter_sees_all_entries() {
        let mut m = SortingMachine::new(Natural);
        m.extend([2, 2, 5]);
        let mut seen: Vec<_> = m.iter().copied().collect();
        seen.sort();
        assert_eq!(seen, vec![2, 2, 5]);
        assert_eq!((&m).into_iter().count(), 3);
    }

    #[test]
    #[should_panic(expected = "add requires insertion mode")]
    fn add_in_extraction_mode_faults() {
        let mut m = SortingMachine::new(Natural);
        m.change_to_extraction_mode();
        m.add(1);
    }

    #[test]
    #[should_panic(expected = "change_to_extraction_mode requires insertion mode")]
    fn second_mode_switch_faults() {
        let mut m: SortingMachine<i32, _> = SortingMachine::new(Natural);
        m.change_to_extraction_mode();
        m.change_to_extraction_mode();
    }

    #[test]
    #[should_panic(expected = "remove_first requires extraction mode")]
    fn remove_in_insertion_mode_faults() {
        let mut m = SortingMachine::new(Natural);
        m.add(1);
        m.remove_first();
    }

    #[test]
    #[should_panic(expected = "drain_sorted requires extraction mode")]
    fn drain_in_insertion_mode_faults() {
        let mut m: SortingMachine<i32, _> = SortingMachine::new(Natural);
        let _ = m.drain_sorted();
    }

    proptest! {
        #[test]
        fn drain_is_nondecreasing(values in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut m = SortingMachine::with_capacity(Natural, values.len());
            m.extend(values.iter().copied());
            prop_assert_eq!(m.size(), values.len());
            m.change_to_extraction_mode();
            let out: Vec<u8> = m.drain_sorted().collect();
            prop_assert!(out.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(multiset::eq(&out[..], &values[..]));
        }
    }
}
