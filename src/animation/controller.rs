use crate::{
    animation::{
        clock::Clock,
        restart::{RestartListener, RestartSignal},
        scheduler::{FrameHandle, FrameScheduler},
    },
    effects::{
        glow::{draw_glow_outline, draw_glow_segment},
        sparkle::{DEFAULT_SPARKLES, draw_sparkles},
    },
    foundation::error::NeonResult,
    geometry::heart::{HeartLayout, HeartOutline},
    render::surface::Surface,
};

/// Glow intensity used while the outline is being revealed.
pub const DRAW_INTENSITY: f64 = 1.2;

/// Idle pulse: `1 + 0.4 sin(elapsed / 500)`.
pub fn pulse_intensity(elapsed_ms: f64) -> f64 {
    1.0 + 0.4 * (elapsed_ms / 500.0).sin()
}

/// Where the controller is in its run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AnimationPhase {
    /// No run in progress; nothing is scheduled.
    Uninitialized,
    /// Revealing the outline; `next_segment` is drawn on the next frame.
    Drawing {
        /// Index of the segment the next frame draws.
        next_segment: usize,
    },
    /// Outline complete, pulsing with sparkles.
    Idle {
        /// Clock reading when the last segment was drawn.
        started_ms: f64,
    },
}

/// What one frame callback did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Drew one more segment of the outline.
    Drew {
        /// Segment index drawn this frame.
        segment: usize,
        /// Progress after this frame, in `[0, 100]`.
        progress: f64,
    },
    /// Drew the last segment and entered the idle phase.
    Completed {
        /// Always 100.
        progress: f64,
    },
    /// Redrew the whole heart for the idle pulse.
    Pulsed {
        /// Glow intensity used for this frame.
        intensity: f64,
        /// Milliseconds since the idle phase began.
        elapsed_ms: f64,
    },
    /// A queued restart was performed instead of drawing.
    Restarted,
    /// The handle was not the pending one; nothing happened.
    Stale,
}

/// Drives the draw-then-pulse animation on a [`Surface`].
///
/// The controller owns at most one pending frame handle at any time. The host delivers due
/// handles to [`AnimationController::on_frame`]; anything else is treated as stale.
pub struct AnimationController<S: Surface, F: FrameScheduler, C: Clock> {
    surface: S,
    scheduler: F,
    clock: C,
    phase: AnimationPhase,
    outline: Option<HeartOutline>,
    progress: f64,
    complete: bool,
    pending: Option<FrameHandle>,
    restart: RestartListener,
    runs: u64,
}

impl<S: Surface, F: FrameScheduler, C: Clock> AnimationController<S, F, C> {
    /// Controller in the `Uninitialized` phase. Call [`Self::start`] once the surface is ready.
    pub fn new(surface: S, scheduler: F, clock: C) -> Self {
        Self {
            surface,
            scheduler,
            clock,
            phase: AnimationPhase::Uninitialized,
            outline: None,
            progress: 0.0,
            complete: false,
            pending: None,
            restart: RestartListener::new(),
            runs: 0,
        }
    }

    /// Begin the first run. A controller that is already running is left untouched.
    ///
    /// Returns whether a run is in progress afterwards. A surface that cannot be acquired is
    /// skipped without error and the controller stays `Uninitialized`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self) -> bool {
        if self.phase != AnimationPhase::Uninitialized {
            tracing::debug!(phase = ?self.phase, "start ignored: already running");
            return true;
        }
        self.begin_run()
    }

    /// Cancel the current run and start drawing a fresh outline from segment 0.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn restart(&mut self) -> bool {
        tracing::info!(previous = ?self.phase, "restarting animation");
        self.begin_run()
    }

    /// Cancel the pending frame and return to `Uninitialized`.
    pub fn dispose(&mut self) {
        self.cancel_pending();
        self.phase = AnimationPhase::Uninitialized;
        self.outline = None;
        self.progress = 0.0;
        self.complete = false;
    }

    /// Trigger that queues a restart, for wiring to a UI control.
    ///
    /// Activations take effect on the controller's thread: hosts call [`Self::process_events`]
    /// before delivering the next due frame, which cancels the pending frame and starts over.
    /// A frame delivered without that call still drains the queue first.
    pub fn subscribe_restart(&self) -> RestartSignal {
        self.restart.subscribe()
    }

    /// Drain queued restart activations; restarts once if any arrived.
    pub fn process_events(&mut self) -> bool {
        let fired = self.restart.drain();
        if fired == 0 {
            return false;
        }
        tracing::debug!(fired, "restart requested");
        self.restart();
        true
    }

    /// Scheduler callback entry point.
    pub fn on_frame(&mut self, handle: FrameHandle) -> FrameOutcome {
        if self.pending != Some(handle) {
            tracing::trace!(handle = handle.id(), "ignoring stale frame");
            return FrameOutcome::Stale;
        }
        self.pending = None;

        if self.process_events() {
            return FrameOutcome::Restarted;
        }

        match self.phase {
            AnimationPhase::Uninitialized => FrameOutcome::Stale,
            AnimationPhase::Drawing { next_segment } => self.draw_frame(next_segment),
            AnimationPhase::Idle { started_ms } => self.idle_frame(started_ms),
        }
    }

    /// Forward a new logical size and pixel ratio to the surface.
    ///
    /// The outline keeps its geometry until the next restart. When the surface rejects the new
    /// size or loses its drawing context, the run is disposed so nothing stays scheduled.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> NeonResult<()> {
        if let Err(err) = self.surface.resize(width, height, dpr) {
            tracing::debug!(%err, width, height, dpr, "resize failed, disposing run");
            self.dispose();
            return Err(err);
        }
        if self.phase != AnimationPhase::Uninitialized {
            self.surface.clear();
            self.surface.present();
        }
        tracing::debug!(width, height, dpr, "surface resized");
        Ok(())
    }

    /// Current phase.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Reveal progress in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the outline has been fully drawn in the current run.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Outline of the current run, if any.
    pub fn outline(&self) -> Option<&HeartOutline> {
        self.outline.as_ref()
    }

    /// The single frame handle this controller is waiting on.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Number of runs started so far (including restarts).
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for hosts that pump it.
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn begin_run(&mut self) -> bool {
        self.dispose();

        if let Err(err) = self.surface.acquire() {
            tracing::debug!(%err, "surface unavailable, skipping run");
            return false;
        }
        self.surface.clear();
        self.surface.present();

        let (width, height) = self.surface.logical_size();
        let outline = HeartLayout::for_surface(width, height).outline();
        tracing::debug!(
            width,
            height,
            segments = outline.segment_count(),
            "outline generated"
        );

        self.outline = Some(outline);
        self.phase = AnimationPhase::Drawing { next_segment: 0 };
        self.runs += 1;
        self.request_frame();
        true
    }

    fn draw_frame(&mut self, segment: usize) -> FrameOutcome {
        let Some(outline) = self.outline.as_ref() else {
            return FrameOutcome::Stale;
        };
        let total = outline.segment_count();
        if let Some((p1, p2)) = outline.segment(segment) {
            draw_glow_segment(&mut self.surface, p1, p2, DRAW_INTENSITY);
        }
        self.surface.present();

        let drawn = (segment + 1).min(total);
        self.progress = if total == 0 {
            100.0
        } else {
            drawn as f64 * 100.0 / total as f64
        };

        if drawn >= total {
            let started_ms = self.clock.now_ms();
            self.phase = AnimationPhase::Idle { started_ms };
            self.complete = true;
            tracing::debug!(started_ms, "outline complete, entering idle");
            self.request_frame();
            FrameOutcome::Completed {
                progress: self.progress,
            }
        } else {
            self.phase = AnimationPhase::Drawing {
                next_segment: segment + 1,
            };
            self.request_frame();
            FrameOutcome::Drew {
                segment,
                progress: self.progress,
            }
        }
    }

    fn idle_frame(&mut self, started_ms: f64) -> FrameOutcome {
        let Some(outline) = self.outline.as_ref() else {
            return FrameOutcome::Stale;
        };
        let elapsed_ms = (self.clock.now_ms() - started_ms).max(0.0);
        let intensity = pulse_intensity(elapsed_ms);

        self.surface.clear();
        draw_glow_outline(&mut self.surface, outline, intensity);
        draw_sparkles(&mut self.surface, outline, elapsed_ms, DEFAULT_SPARKLES);
        self.surface.present();

        self.request_frame();
        FrameOutcome::Pulsed {
            intensity,
            elapsed_ms,
        }
    }

    fn request_frame(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Surface, F: FrameScheduler, C: Clock> Drop for AnimationController<S, F, C> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/controller.rs"]
mod tests;
