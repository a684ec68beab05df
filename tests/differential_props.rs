//! Model-based checks: random operation sequences run against the heap
//! machine and the reference machine in lockstep.

use proptest::prelude::*;
use sorting_machine::harness::{DifferentialHarness, Op};
use sorting_machine::{CaseInsensitive, InsertionStrategy, ReferenceMachine, SortingMachine};

fn op_strategy() -> impl Strategy<Value = Op<String>> {
    prop_oneof![
        6 => "[a-dA-D0-9]{0,4}".prop_map(Op::Add),
        1 => Just(Op::ChangeToExtractionMode),
        4 => Just(Op::RemoveFirst),
    ]
}

proptest! {
    #[test]
    fn heap_machine_matches_reference(
        ops in proptest::collection::vec(op_strategy(), 0..120),
        incremental in any::<bool>(),
    ) {
        let strategy = if incremental {
            InsertionStrategy::Incremental
        } else {
            InsertionStrategy::Deferred
        };
        let mut harness = DifferentialHarness::new(
            SortingMachine::with_strategy(CaseInsensitive, strategy),
            ReferenceMachine::new(CaseInsensitive),
        );
        let count = ops.len();
        if let Err(divergence) = harness.run(ops) {
            prop_assert!(false, "{}", divergence);
        }
        prop_assert_eq!(harness.steps(), count);
    }

    #[test]
    fn fill_then_drain_matches_reference(words in proptest::collection::vec("[a-z]{1,5}", 0..80)) {
        let mut harness = DifferentialHarness::new(
            SortingMachine::new(CaseInsensitive),
            ReferenceMachine::new(CaseInsensitive),
        );
        let n = words.len();
        let ops = words
            .into_iter()
            .map(Op::Add)
            .chain(std::iter::once(Op::ChangeToExtractionMode))
            .chain(std::iter::repeat(Op::RemoveFirst).take(n + 1));
        prop_assert_eq!(harness.run(ops), Ok(()));
    }
}
