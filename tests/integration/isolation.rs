//! Isolation across unrelated execution lineages.
//!
//! A single manager serves many threads; values set on one lineage must
//! never surface on another, under sequential sibling scopes or under
//! concurrent access.

use super::test_utils::create_test_manager;
use framectx::{ContextPropagator, ContextValue, FramePlatform};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_sequential_sibling_scopes_do_not_leak() {
    let (manager, platform) = create_test_manager();

    // First sibling: enter, set, read back, leave.
    let first_sibling = platform.enter_frame().unwrap();
    let first_value = ContextValue::new("sibling-1".to_string());
    manager.set_current_value("id", &first_value).unwrap();
    assert_eq!(manager.get_current_value("id").unwrap(), first_value);
    platform.release_scope(first_sibling.scope);

    // Back at the root lineage nothing is visible.
    assert!(manager.get_current_value("id").is_none());

    // Second sibling sees only its own value.
    let second_sibling = platform.enter_frame().unwrap();
    let second_value = ContextValue::new("sibling-2".to_string());
    manager.set_current_value("id", &second_value).unwrap();
    assert_eq!(manager.get_current_value("id").unwrap(), second_value);
    platform.release_scope(second_sibling.scope);
}

#[test]
fn test_concurrent_roots_never_cross_read() {
    let (manager, _platform) = create_test_manager();
    let manager = Arc::new(manager);
    let threads = 8;
    let rounds = 200;
    let barrier = Arc::new(Barrier::new(threads));

    let mut handles = Vec::new();
    for thread_index in 0..threads {
        let manager = Arc::clone(&manager);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for round in 0..rounds {
                let mine = ContextValue::new(format!("t{}-r{}", thread_index, round));
                manager.set_current_value("id", &mine).unwrap();

                let seen = manager
                    .get_current_value("id")
                    .expect("own value must be visible");
                assert_eq!(seen, mine, "observed a value from another lineage");
                assert_eq!(
                    seen.downcast_ref::<String>().unwrap(),
                    &format!("t{}-r{}", thread_index, round)
                );

                manager.remove_value("id", &mine);
                assert!(manager.get_current_value("id").is_none());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.open_scopes(), 0);
}

#[test]
fn test_concurrent_shadowing_stays_per_thread() {
    let (manager, _platform) = create_test_manager();
    let manager = Arc::new(manager);
    let barrier = Arc::new(Barrier::new(4));

    let mut handles = Vec::new();
    for thread_index in 0..4 {
        let manager = Arc::clone(&manager);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let outer = ContextValue::new(format!("outer-{}", thread_index));
            let inner = ContextValue::new(format!("inner-{}", thread_index));

            manager.set_current_value("trace", &outer).unwrap();
            manager.set_current_value("trace", &inner).unwrap();
            assert_eq!(manager.get_current_value("trace").unwrap(), inner);

            manager.remove_value("trace", &inner);
            assert_eq!(manager.get_current_value("trace").unwrap(), outer);

            manager.remove_value("trace", &outer);
            assert!(manager.get_current_value("trace").is_none());
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.open_scopes(), 0);
}

#[test]
fn test_independent_managers_are_isolated() {
    let (first_manager, _first_platform) = create_test_manager();
    let (second_manager, _second_platform) = create_test_manager();
    let value = ContextValue::new("only-in-first".to_string());

    first_manager.set_current_value("k", &value).unwrap();

    assert!(first_manager.get_current_value("k").is_some());
    assert!(second_manager.get_current_value("k").is_none());
}
