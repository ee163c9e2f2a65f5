//! Thread safety integration tests for `pinwatch`.
//!
//! These tests verify that stopwatches and the registry can be shared between threads
//! without losing or desynchronizing pins.

use std::sync::Arc;
use std::thread;

use pinwatch::{Registry, Stopwatch};

const THREADS: usize = 8;
const PINS_PER_THREAD: usize = 250;

#[test]
fn concurrent_pins_are_all_recorded() {
    let watch = Arc::new(Stopwatch::with_name("shared"));
    watch.start().unwrap();

    thread::scope(|s| {
        for t in 0..THREADS {
            let watch = Arc::clone(&watch);
            s.spawn(move || {
                for i in 0..PINS_PER_THREAD {
                    if i % 2 == 0 {
                        watch.pin_named(format!("t{t}-{i}")).unwrap();
                    } else {
                        watch.pin().unwrap();
                    }
                }
            });
        }
    });

    let expected = THREADS * PINS_PER_THREAD + 1;
    assert_eq!(watch.pin_count(), expected);
    assert_eq!(watch.timeline().len(), expected);
    assert_eq!(watch.pin_names().len(), expected);
    assert_eq!(watch.interval_line().len(), expected - 1);

    // Pins are appended under one lock, so the timeline never goes backwards.
    assert!(watch.interval_line().iter().all(|delta| *delta >= 0));
}

#[test]
fn concurrent_pause_and_pin_stay_consistent() {
    let watch = Arc::new(Stopwatch::with_name("toggling"));
    watch.start().unwrap();

    thread::scope(|s| {
        let toggler = Arc::clone(&watch);
        s.spawn(move || {
            for _ in 0..PINS_PER_THREAD {
                toggler.pause();
                toggler.keep();
            }
        });

        for _ in 0..THREADS {
            let pinner = Arc::clone(&watch);
            s.spawn(move || {
                for _ in 0..PINS_PER_THREAD {
                    pinner.pin().unwrap();
                }
            });
        }
    });

    assert!(watch.is_running());
    assert_eq!(watch.pin_count(), THREADS * PINS_PER_THREAD + 1);
    assert!(watch.interval_line().iter().all(|delta| *delta >= 0));
}

#[test]
fn registry_hands_out_one_instance_per_name_across_threads() {
    let registry = Registry::new();

    let watches: Vec<Arc<Stopwatch>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let registry = &registry;
                s.spawn(move || registry.get_or_create(format!("name-{}", i % 2)))
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(registry.len(), 2);

    for watch in &watches {
        let same = registry.get_or_create(watch.name());
        assert!(Arc::ptr_eq(watch, &same));
    }
}

#[test]
fn remove_races_with_get_or_create() {
    let registry = Registry::new();

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..PINS_PER_THREAD {
                drop(registry.get_or_create("contended"));
            }
        });
        s.spawn(|| {
            for _ in 0..PINS_PER_THREAD {
                registry.remove("contended");
            }
        });
    });

    // Whatever the interleaving, the name maps to at most one live instance.
    assert!(registry.len() <= 1);
    let watch = registry.get_or_create("contended");
    assert!(Arc::ptr_eq(&watch, &registry.get_or_create("contended")));
}

#[test]
fn stopwatch_can_be_moved_between_threads() {
    let watch = Stopwatch::with_name("moved");
    watch.start().unwrap();

    let handle = thread::spawn(move || {
        watch.pin_named("remote").unwrap();
        watch.stop().unwrap();
        watch
    });

    let watch = handle.join().unwrap();
    assert!(watch.is_stopped());
    assert!(watch.pin_time("remote") >= 0);
}
