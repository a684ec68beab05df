//! Differential harness: drive two machines in lockstep and compare them.

#![warn(missing_docs)]

use crate::error::MachineError;
use crate::kernel::SortingMachineKernel;
use crate::multiset;
use crate::order::Order;
use std::marker::PhantomData;

/// One step applied to both machines.
#[derive(Debug, Clone, PartialEq)]
pub enum Op<T> {
    /// `try_add` the element.
    Add(T),
    /// `try_change_to_extraction_mode`.
    ChangeToExtractionMode,
    /// `try_remove_first`.
    RemoveFirst,
}

/// First observable mismatch between subject and reference.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Divergence {
    /// One machine accepted the op and the other rejected it, or they
    /// rejected it differently.
    #[error("step {step}: outcome differs (subject {subject:?}, reference {reference:?})")]
    Outcome {
        /// Index of the op.
        step: usize,
        /// Subject's error, if any.
        subject: Option<MachineError>,
        /// Reference's error, if any.
        reference: Option<MachineError>,
    },
    /// The removed elements are not order-equivalent.
    #[error("step {step}: extracted values are not order-equivalent")]
    Extracted {
        /// Index of the op.
        step: usize,
    },
    /// The machines disagree on the mode.
    #[error("step {step}: mode differs")]
    Mode {
        /// Index of the op.
        step: usize,
    },
    /// The machines hold different numbers of elements.
    #[error("step {step}: size differs (subject {subject}, reference {reference})")]
    Size {
        /// Index of the op.
        step: usize,
        /// Subject's size.
        subject: usize,
        /// Reference's size.
        reference: usize,
    },
    /// The bags differ even up to order-equivalence.
    #[error("step {step}: contents differ")]
    Contents {
        /// Index of the op.
        step: usize,
    },
}

/// Harness for differential checks: applies each [`Op`] to a subject and a
/// reference machine and compares everything observable.
///
/// Extracted values and contents are compared up to order-equivalence, since
/// either machine may pick any of several equivalent minima.
pub struct DifferentialHarness<T, A, B> {
    subject: A,
    reference: B,
    steps: usize,
    _elem: PhantomData<fn(T)>,
}

impl<T, A, B> DifferentialHarness<T, A, B>
where
    T: Clone,
    A: SortingMachineKernel<T>,
    B: SortingMachineKernel<T>,
{
    /// Create harness from two machines in the same state.
    pub fn new(subject: A, reference: B) -> Self {
        Self {
            subject,
            reference,
            steps: 0,
            _elem: PhantomData,
        }
    }

    /// Apply `op` to both machines and compare.
    pub fn apply(&mut self, op: Op<T>) -> Result<(), Divergence> {
        let step = self.steps;
        self.steps += 1;
        match op {
            Op::Add(x) => {
                let a = self.subject.try_add(x.clone());
                let b = self.reference.try_add(x);
                same_outcome(step, a.err(), b.err())?;
            }
            Op::ChangeToExtractionMode => {
                let a = self.subject.try_change_to_extraction_mode();
                let b = self.reference.try_change_to_extraction_mode();
                same_outcome(step, a.err(), b.err())?;
            }
            Op::RemoveFirst => {
                let a = self.subject.try_remove_first();
                let b = self.reference.try_remove_first();
                match (a, b) {
                    (Ok(x), Ok(y)) => {
                        if !self.subject.order().equivalent(&x, &y) {
                            return Err(Divergence::Extracted { step });
                        }
                    }
                    (a, b) => same_outcome(step, a.err(), b.err())?,
                }
            }
        }
        self.compare(step)
    }

    /// Apply every op in turn, stopping at the first divergence.
    pub fn run<I: IntoIterator<Item = Op<T>>>(&mut self, ops: I) -> Result<(), Divergence> {
        ops.into_iter().try_for_each(|op| self.apply(op))
    }

    /// Number of ops applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The machine under test.
    pub fn subject(&self) -> &A {
        &self.subject
    }

    /// The oracle machine.
    pub fn reference(&self) -> &B {
        &self.reference
    }

    fn compare(&self, step: usize) -> Result<(), Divergence> {
        if self.subject.is_in_insertion_mode() != self.reference.is_in_insertion_mode() {
            return Err(Divergence::Mode { step });
        }
        if self.subject.size() != self.reference.size() {
            return Err(Divergence::Size {
                step,
                subject: self.subject.size(),
                reference: self.reference.size(),
            });
        }
        let order = self.subject.order();
        if !multiset::eq_by(self.subject.entries(), self.reference.entries(), |x, y| {
            order.equivalent(x, y)
        }) {
            return Err(Divergence::Contents { step });
        }
        Ok(())
    }
}

fn same_outcome(
    step: usize,
    subject: Option<MachineError>,
    reference: Option<MachineError>,
) -> Result<(), Divergence> {
    if subject == reference {
        Ok(())
    } else {
        Err(Divergence::Outcome {
            step,
            subject,
            reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::SortingMachine;
    use crate::order::CaseInsensitive;
    use crate::reference::ReferenceMachine;

    #[test]
    fn harness_basic() {
        let mut harness = DifferentialHarness::new(
            SortingMachine::new(CaseInsensitive),
            ReferenceMachine::new(CaseInsensitive),
        );
        harness
            .run([
                Op::Add("beer"),
                Op::Add("A"),
                Op::Add("apple"),
                Op::Add("a"),
                Op::ChangeToExtractionMode,
                Op::RemoveFirst,
                Op::RemoveFirst,
                Op::RemoveFirst,
            ])
            .unwrap();
        assert_eq!(harness.steps(), 8);
        assert_eq!(harness.subject().size(), 1);
        assert_eq!(harness.reference().entries(), &["beer"]);
    }

    #[test]
    fn illegal_ops_rejected_alike() {
        let mut harness = DifferentialHarness::new(
            SortingMachine::new(CaseInsensitive),
            ReferenceMachine::new(CaseInsensitive),
        );
        harness
            .run([
                Op::RemoveFirst,
                Op::ChangeToExtractionMode,
                Op::ChangeToExtractionMode,
                Op::Add("late"),
                Op::RemoveFirst,
            ])
            .unwrap();
        assert_eq!(harness.subject().size(), 0);
    }

    #[test]
    fn detects_divergent_machines() {
        let mut reference = ReferenceMachine::new(CaseInsensitive);
        reference.add("extra");
        let mut harness = DifferentialHarness::new(SortingMachine::new(CaseInsensitive), reference);
        assert_eq!(
            harness.apply(Op::Add("x")),
            Err(Divergence::Size {
                step: 0,
                subject: 1,
                reference: 2
            })
        );
    }
}
