use super::*;

#[test]
fn handles_are_unique_and_delivered_in_order() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    let b = s.request_frame();
    assert_ne!(a, b);
    assert_eq!(s.pending_count(), 2);
    assert_eq!(s.take_due(), Some(a));
    assert_eq!(s.take_due(), Some(b));
    assert_eq!(s.take_due(), None);
    assert_eq!(s.requested_count(), 2);
}

#[test]
fn cancel_removes_only_pending_handles() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    s.cancel(a);
    assert!(!s.is_pending(a));
    assert_eq!(s.cancelled_count(), 1);

    // Cancelling twice or cancelling a delivered handle is a no-op.
    s.cancel(a);
    let b = s.request_frame();
    assert_eq!(s.take_due(), Some(b));
    s.cancel(b);
    assert_eq!(s.cancelled_count(), 1);
    assert!(b.id() > a.id());
}
