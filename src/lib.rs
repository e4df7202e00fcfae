//! neon-heart draws an animated neon heart greeting.
//!
//! A parametric heart outline is revealed one segment per frame with a multi-pass glow, then the
//! finished heart pulses and sparkles until a restart. The pieces are:
//!
//! - [`generate_heart_outline`] and [`HeartLayout`] for the geometry
//! - [`draw_glow_segment`] and [`draw_sparkles`] for the effects, drawn on any [`Surface`]
//! - [`AnimationController`], driven by a [`FrameScheduler`] and a [`Clock`]
//! - [`CpuSurface`] and [`Recorder`] to render frames offline into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod effects;
/// Frame sinks (in-memory, PNG sequence, MP4 via `ffmpeg`).
pub mod encode;
pub(crate) mod geometry;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::core::{Affine, Fps, FrameIndex, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{NeonError, NeonResult};

pub use crate::animation::clock::{Clock, ManualClock, SystemClock};
pub use crate::animation::controller::{
    AnimationController, AnimationPhase, DRAW_INTENSITY, FrameOutcome, pulse_intensity,
};
pub use crate::animation::restart::RestartSignal;
pub use crate::animation::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use crate::effects::glow::{
    GLOW_PASS_COUNT, draw_glow_outline, draw_glow_segment, glow_passes,
};
pub use crate::effects::sparkle::{
    DEFAULT_SPARKLES, SPARKLE_RAYS, Sparkle, draw_sparkles, sparkle_at,
};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geometry::heart::{
    DEFAULT_STEPS, HeartLayout, HeartOutline, generate_heart_outline, heart_point,
};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::recording::{DrawOp, RecordingSurface};
pub use crate::render::style::{FillStyle, LineCap, LineJoin, Shadow, StrokeStyle};
pub use crate::render::surface::Surface;
pub use crate::session::recorder::{RecordStats, Recorder, RecorderOpts};
