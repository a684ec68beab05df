//! The contract shared by every sorting machine implementation.

use crate::error::MachineError;
use crate::order::Order;

/// Kernel operations of a sorting machine, in checked form.
///
/// Implementations hold a multiset of `T`, a mode, and an order. The
/// panicking forms (`add`, `remove_first`, ...) live on the concrete types;
/// this trait is what generic code such as the differential harness drives.
pub trait SortingMachineKernel<T> {
    /// The order elements are extracted by.
    type Order: Order<T>;

    /// Add `x` in insertion mode.
    fn try_add(&mut self, x: T) -> Result<(), MachineError>;

    /// Switch from insertion to extraction mode, once.
    fn try_change_to_extraction_mode(&mut self) -> Result<(), MachineError>;

    /// Remove a minimal element in extraction mode.
    fn try_remove_first(&mut self) -> Result<T, MachineError>;

    /// True while the machine accepts `add`.
    fn is_in_insertion_mode(&self) -> bool;

    /// The order fixed at construction.
    fn order(&self) -> &Self::Order;

    /// Number of elements held.
    fn size(&self) -> usize;

    /// The held elements, in unspecified arrangement.
    fn entries(&self) -> &[T];
}
