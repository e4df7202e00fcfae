use super::*;

#[test]
fn drain_counts_and_clears_activations() {
    let listener = RestartListener::new();
    let signal = listener.subscribe();
    assert_eq!(listener.drain(), 0);

    assert!(signal.fire());
    assert!(signal.clone().fire());
    assert_eq!(listener.drain(), 2);
    assert_eq!(listener.drain(), 0);
}

#[test]
fn signal_fires_from_another_thread() {
    let listener = RestartListener::new();
    let signal = listener.subscribe();
    std::thread::spawn(move || {
        signal.fire();
    })
    .join()
    .unwrap();
    assert_eq!(listener.drain(), 1);
}

#[test]
fn fire_reports_dropped_listener() {
    let listener = RestartListener::new();
    let signal = listener.subscribe();
    drop(listener);
    assert!(!signal.fire());
}
