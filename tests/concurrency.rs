//! Concurrent use of a shared transition graph and receiver.

use serde_json::json;
use statewarden::changeset::CHANGE_DETECTION_FIELD;
use statewarden::core::TransitionGraph;
use statewarden::detect::{FieldCatalog, FieldDescriptor, FieldSnapshot};
use statewarden::dispatch::{EventFiring, StateHandler};
use statewarden::receiver::StateMachineReceiver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn parallel_writers_lose_no_edges() {
    const WRITERS: u32 = 16;
    let graph = Arc::new(TransitionGraph::<u32>::new());

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || graph.add_allowed_transition(i, i + 1))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }

    assert_eq!(graph.len(), WRITERS as usize);
    for i in 0..WRITERS {
        assert!(graph.is_allowed_transition(&i, &(i + 1)));
    }
}

#[test]
fn parallel_duplicate_writers_store_one_edge() {
    let graph = Arc::new(TransitionGraph::<String>::new());

    let inserted: usize = (0..8)
        .map(|_| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                graph.add_allowed_transition("Open".to_string(), "Closed".to_string())
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| usize::from(handle.join().unwrap()))
        .sum();

    assert_eq!(inserted, 1);
    assert_eq!(graph.len(), 1);
}

#[test]
fn readers_and_writers_share_one_graph() {
    let graph = Arc::new(TransitionGraph::<u32>::new().with_transition(0, 1));

    let writer = {
        let graph = Arc::clone(&graph);
        thread::spawn(move || {
            for i in 1..200 {
                graph.add_allowed_transition(i, i + 1);
            }
        })
    };
    let reader = {
        let graph = Arc::clone(&graph);
        thread::spawn(move || {
            for _ in 0..200 {
                assert!(graph.is_allowed_transition(&0, &1));
                assert!(graph.is_transitional_state(&0));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(graph.len(), 200);
}

#[test]
fn concurrent_updates_keep_their_own_firing_flags() {
    let fired = Arc::new(AtomicUsize::new(0));
    let receiver = {
        let fired = Arc::clone(&fired);
        StateMachineReceiver::<String, Vec<EventFiring>, String>::builder()
            .column("Status")
            .transition("Open".to_string(), "Closed".to_string())
            .on_state(
                "Closed".to_string(),
                StateHandler::new(move |seen: &mut Vec<EventFiring>, firing| {
                    fired.fetch_add(1, Ordering::SeqCst);
                    seen.push(firing);
                    Ok(())
                })
                .disable_firing(),
            )
            .build()
            .unwrap()
    };
    let receiver = Arc::new(receiver);

    let mut catalog = FieldCatalog::new().with_field(FieldDescriptor::new("Status"));
    catalog.ensure_change_detection_field();
    let catalog = Arc::new(catalog);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let receiver = Arc::clone(&receiver);
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let before = FieldSnapshot::from([("Status".to_string(), json!("Open"))]);
                let mut after = FieldSnapshot::from([("Status".to_string(), json!("Closed"))]);
                receiver.item_updating(&catalog, &before, &mut after).unwrap();
                assert_eq!(after[CHANGE_DETECTION_FIELD], json!("[0]"));

                // Each record starts from its own flag value.
                let initial = if i % 2 == 0 {
                    EventFiring::Enabled
                } else {
                    EventFiring::Disabled
                };
                let mut firing = initial;
                let mut seen = Vec::new();
                receiver
                    .item_updated(&catalog, &after, &mut firing, &mut seen)
                    .unwrap();

                assert_eq!(seen, vec![EventFiring::Disabled]);
                assert_eq!(firing, initial);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(fired.load(Ordering::SeqCst), 8);
}
