use crate::animation::clock::ManualClock;
use crate::animation::controller::{AnimationController, AnimationPhase, FrameOutcome};
use crate::animation::restart::RestartSignal;
use crate::animation::scheduler::ManualScheduler;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{NeonError, NeonResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};

type OfflineController = AnimationController<CpuSurface, ManualScheduler, ManualClock>;

/// Options for an offline [`Recorder`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecorderOpts {
    /// Logical surface width.
    pub width: f64,
    /// Logical surface height.
    pub height: f64,
    /// Device pixel ratio; output frames are `round(size * dpr)` pixels.
    pub dpr: f64,
    /// Frame rate used to advance the clock between frames.
    pub fps: Fps,
    /// Fire the restart signal right before this frame.
    pub restart_at: Option<FrameIndex>,
    /// Raster surface options.
    pub surface: CpuSurfaceOpts,
}

impl Default for RecorderOpts {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            dpr: 1.0,
            fps: Fps { num: 60, den: 1 },
            restart_at: None,
            surface: CpuSurfaceOpts::default(),
        }
    }
}

/// Summary of a [`Recorder::record`] call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Restarts performed during the recording.
    pub restarts: u64,
    /// Phase after the last frame.
    pub final_phase: AnimationPhase,
    /// Reveal progress after the last frame.
    pub final_progress: f64,
}

/// Runs the animation offline on a [`CpuSurface`] with a manual clock and scheduler.
///
/// Frame `n` is produced by advancing the clock `n` frame durations from the start and delivering
/// one due frame callback per step.
pub struct Recorder {
    opts: RecorderOpts,
    controller: OfflineController,
    clock: ManualClock,
    restart: RestartSignal,
    next_frame: u64,
}

impl Recorder {
    /// Build the surface and controller and start the first run.
    #[tracing::instrument(level = "debug")]
    pub fn new(opts: RecorderOpts) -> NeonResult<Self> {
        let fps = Fps::new(opts.fps.num, opts.fps.den)?;
        let opts = RecorderOpts { fps, ..opts };
        let (controller, clock) = build_controller(&opts)?;
        let restart = controller.subscribe_restart();
        Ok(Self {
            opts,
            controller,
            clock,
            restart,
            next_frame: 0,
        })
    }

    /// Recorder options.
    pub fn opts(&self) -> &RecorderOpts {
        &self.opts
    }

    /// The driven controller.
    pub fn controller(&self) -> &AnimationController<CpuSurface, ManualScheduler, ManualClock> {
        &self.controller
    }

    /// Trigger shared with the controller; firing it restarts at the next step, which then draws
    /// segment 0 of the fresh outline.
    pub fn restart_signal(&self) -> RestartSignal {
        self.restart.clone()
    }

    /// Index of the frame the next [`Self::step`] produces.
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.next_frame)
    }

    /// Discard all state and start over at frame 0.
    pub fn reset(&mut self) -> NeonResult<()> {
        let (controller, clock) = build_controller(&self.opts)?;
        self.restart = controller.subscribe_restart();
        self.controller = controller;
        self.clock = clock;
        self.next_frame = 0;
        Ok(())
    }

    /// Produce the next frame. Returns `None` when no frame callback was pending.
    pub fn step(&mut self) -> Option<FrameOutcome> {
        let n = self.next_frame;
        if self.opts.restart_at == Some(FrameIndex(n)) {
            self.restart.fire();
        }
        if n > 0 {
            self.clock.advance_ms(self.opts.fps.frame_duration_ms());
        }
        self.next_frame += 1;

        // Queued restarts replace the pending frame before anything is delivered.
        self.controller.process_events();
        let handle = self.controller.scheduler_mut().take_due()?;
        let outcome = self.controller.on_frame(handle);
        tracing::trace!(frame = n, ?outcome, "stepped");
        Some(outcome)
    }

    /// Render frame `n`, stepping forward (or resetting first when `n` was already passed).
    pub fn render_frame(&mut self, n: FrameIndex) -> NeonResult<FrameRGBA> {
        if n.0 < self.next_frame {
            self.reset()?;
        }
        while self.next_frame <= n.0 {
            self.step();
        }
        self.controller.surface().snapshot()
    }

    /// Render frames `[0, frames)` into `sink`.
    #[tracing::instrument(level = "debug", skip(self, sink))]
    pub fn record(&mut self, frames: u64, sink: &mut dyn FrameSink) -> NeonResult<RecordStats> {
        if frames == 0 {
            return Err(NeonError::validation("record needs at least one frame"));
        }
        if self.next_frame != 0 {
            self.reset()?;
        }
        let runs_before = self.controller.runs();

        let (width, height) = self.controller.surface().pixel_size().ok_or_else(|| {
            NeonError::surface_unavailable("recorder surface lost its drawing context")
        })?;
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.opts.fps,
        })?;

        for idx in 0..frames {
            self.step();
            let frame = self.controller.surface().snapshot()?;
            sink.push_frame(FrameIndex(idx), &frame)?;
        }
        sink.end()?;

        let stats = RecordStats {
            frames,
            width,
            height,
            restarts: self.controller.runs() - runs_before,
            final_phase: self.controller.phase(),
            final_progress: self.controller.progress(),
        };
        tracing::info!(
            frames,
            width,
            height,
            restarts = stats.restarts,
            "recording finished"
        );
        Ok(stats)
    }
}

fn build_controller(opts: &RecorderOpts) -> NeonResult<(OfflineController, ManualClock)> {
    let surface = CpuSurface::new(opts.width, opts.height, opts.dpr, opts.surface)?;
    let clock = ManualClock::new();
    let mut controller = AnimationController::new(surface, ManualScheduler::new(), clock.clone());
    if !controller.start() {
        return Err(NeonError::surface_unavailable(format!(
            "cannot draw on a {}x{} surface at dpr {}",
            opts.width, opts.height, opts.dpr
        )));
    }
    Ok((controller, clock))
}

#[cfg(test)]
#[path = "../../tests/unit/session/recorder.rs"]
mod tests;
