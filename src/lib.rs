//! Sorting machines: collect elements, switch mode once, extract them in order.
//!
//! [`SortingMachine`](machine::SortingMachine) is the heap-backed
//! implementation. [`ReferenceMachine`](reference::ReferenceMachine) is a
//! naive one kept for differential testing through
//! [`harness::DifferentialHarness`].

pub mod builder;
pub mod error;
#[doc(hidden)]
pub mod harness;
pub mod heap;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod kernel;
pub mod machine;
pub mod mode;
pub mod multiset;
pub mod order;
pub mod reference;

pub use builder::MachineBuilder;
pub use error::MachineError;
pub use kernel::SortingMachineKernel;
pub use machine::{InsertionStrategy, SortingMachine};
pub use mode::Mode;
pub use order::{CaseInsensitive, Natural, Order, Reverse};
pub use reference::ReferenceMachine;
