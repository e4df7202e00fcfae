use super::*;
use crate::encode::sink::InMemorySink;

fn fast_opts() -> RecorderOpts {
    RecorderOpts {
        width: 80.0,
        height: 60.0,
        surface: CpuSurfaceOpts::default().with_shadows(false),
        ..RecorderOpts::default()
    }
}

#[test]
fn defaults_match_widget_canvas() {
    let opts = RecorderOpts::default();
    assert_eq!((opts.width, opts.height, opts.dpr), (400.0, 300.0, 1.0));
    assert_eq!(opts.fps, Fps { num: 60, den: 1 });
    assert!(opts.restart_at.is_none());
}

#[test]
fn new_rejects_undrawable_surfaces_and_bad_fps() {
    let tiny = RecorderOpts {
        width: 0.0,
        ..fast_opts()
    };
    assert!(matches!(
        Recorder::new(tiny),
        Err(NeonError::SurfaceUnavailable(_))
    ));
    let bad_fps = RecorderOpts {
        fps: Fps { num: 0, den: 1 },
        ..fast_opts()
    };
    assert!(Recorder::new(bad_fps).is_err());
}

#[test]
fn steps_reveal_then_pulse() {
    let mut rec = Recorder::new(fast_opts()).unwrap();
    assert_eq!(
        rec.step(),
        Some(FrameOutcome::Drew {
            segment: 0,
            progress: 0.5
        })
    );
    for _ in 1..199 {
        assert!(matches!(rec.step(), Some(FrameOutcome::Drew { .. })));
    }
    assert_eq!(
        rec.step(),
        Some(FrameOutcome::Completed { progress: 100.0 })
    );
    match rec.step() {
        Some(FrameOutcome::Pulsed { elapsed_ms, .. }) => {
            assert!((elapsed_ms - 1000.0 / 60.0).abs() < 1e-9);
        }
        other => panic!("expected an idle frame, got {other:?}"),
    }
    assert_eq!(rec.next_frame(), FrameIndex(201));
}

#[test]
fn render_frame_rewinds_when_needed() {
    let mut rec = Recorder::new(fast_opts()).unwrap();
    let late = rec.render_frame(FrameIndex(20)).unwrap();
    let early = rec.render_frame(FrameIndex(5)).unwrap();
    assert_eq!(rec.next_frame(), FrameIndex(6));
    assert_ne!(late, early);
    assert_eq!(rec.render_frame(FrameIndex(5)).unwrap(), early);
}

#[test]
fn record_streams_frames_and_reports_restarts() {
    let opts = RecorderOpts {
        restart_at: Some(FrameIndex(3)),
        ..fast_opts()
    };
    let mut rec = Recorder::new(opts).unwrap();
    let mut sink = InMemorySink::new();
    let stats = rec.record(6, &mut sink).unwrap();

    assert_eq!(stats.frames, 6);
    assert_eq!((stats.width, stats.height), (80, 60));
    assert_eq!(stats.restarts, 1);
    // Frame 3 restarts and draws segment 0; frames 4 and 5 draw segments 1 and 2.
    assert_eq!(stats.final_phase, AnimationPhase::Drawing { next_segment: 3 });
    assert_eq!(stats.final_progress, 1.5);
    assert_eq!(sink.frames().len(), 6);
    assert!(sink.is_finished());

    assert!(rec.record(0, &mut sink).is_err());
}

#[test]
fn fired_restart_replaces_the_pending_frame_in_the_same_step() {
    let mut rec = Recorder::new(fast_opts()).unwrap();
    for _ in 0..200 {
        rec.step();
    }
    assert!(matches!(
        rec.controller().phase(),
        AnimationPhase::Idle { .. }
    ));
    let idle = rec.controller().pending_frame().unwrap();
    let cancelled = rec.controller().scheduler().cancelled_count();

    rec.restart_signal().fire();
    assert_eq!(
        rec.step(),
        Some(FrameOutcome::Drew {
            segment: 0,
            progress: 0.5
        })
    );
    assert!(!rec.controller().scheduler().is_pending(idle));
    assert_eq!(rec.controller().scheduler().cancelled_count(), cancelled + 1);
    assert_eq!(rec.controller().scheduler().pending_count(), 1);
    assert_eq!(rec.controller().runs(), 2);
}

#[test]
fn stats_serialize_to_json() {
    let stats = RecordStats {
        frames: 2,
        width: 4,
        height: 2,
        restarts: 0,
        final_phase: AnimationPhase::Idle { started_ms: 5.0 },
        final_progress: 100.0,
    };
    let v = serde_json::to_value(stats).unwrap();
    assert_eq!(v["final_phase"]["phase"], "idle");
    assert_eq!(v["frames"], 2);
}
