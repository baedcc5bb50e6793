//! Property-based tests for set/get/remove interleavings.
//!
//! On a single lineage, repeated sets of one key nest scopes, so the open
//! values form a stack: a get must always observe the most recent un-removed
//! value, and removing or dropping the newest value must expose the one
//! beneath it.

use framectx::{ContextManager, ContextPropagator, ContextValue, ThreadFramePlatform};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
enum Op {
    Set,
    Remove,
    DropNewest,
    Get,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Set),
        2 => Just(Op::Remove),
        1 => Just(Op::DropNewest),
        3 => Just(Op::Get),
    ]
}

/// Run one interleaving against the manager and a stack model.
fn check_interleaving(ops: &[Op]) {
    let platform = Arc::new(ThreadFramePlatform::new());
    let manager = ContextManager::new(platform.clone());

    let mut model: Vec<ContextValue> = Vec::new();
    let mut counter = 0u64;

    for op in ops {
        match op {
            Op::Set => {
                counter += 1;
                let value = ContextValue::new(counter);
                manager.set_current_value("trace", &value).unwrap();
                model.push(value);
            }
            Op::Remove => {
                if let Some(value) = model.pop() {
                    manager.remove_value("trace", &value);
                }
            }
            Op::DropNewest => {
                // Reclaim path: no explicit remove, just lose the handle.
                if let Some(value) = model.pop() {
                    drop(value);
                }
            }
            Op::Get => {
                let observed = manager.get_current_value("trace");
                match model.last() {
                    Some(expected) => {
                        let observed = observed.expect("newest un-removed value must be visible");
                        assert_eq!(&observed, expected);
                    }
                    None => assert!(observed.is_none(), "no value should be visible"),
                }
            }
        }
    }

    // Whatever remains open is exactly the model's stack.
    assert_eq!(manager.open_scopes(), model.len());
    match model.last() {
        Some(expected) => assert_eq!(&manager.get_current_value("trace").unwrap(), expected),
        None => assert!(manager.get_current_value("trace").is_none()),
    }
}

#[test]
fn test_interleaving_matches_stack_model() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec(op_strategy(), 0..64),
            |ops| {
                check_interleaving(&ops);
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_unremoved_values_unwind_cleanly_on_drop() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..12), |depth| {
            let platform = Arc::new(ThreadFramePlatform::new());
            let manager = ContextManager::new(platform.clone());

            let values: Vec<ContextValue> =
                (0..depth).map(|i| ContextValue::new(i as u64)).collect();
            for value in &values {
                manager.set_current_value("trace", value).unwrap();
            }
            assert_eq!(platform.depth(), depth);

            // Dropping every handle reclaims every scope, outermost first or
            // innermost first does not matter.
            drop(values);
            assert_eq!(manager.open_scopes(), 0);
            assert_eq!(platform.depth(), 0);
            assert!(manager.get_current_value("trace").is_none());
            Ok(())
        })
        .unwrap();
}
