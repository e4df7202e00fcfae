//! Frame sinks.
//!
//! Sinks consume rendered frames in output order and are driven by [`crate::Recorder::record`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG image sequence sink.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
