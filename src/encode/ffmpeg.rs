use std::ffi::OsString;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, check_frame_size, ensure_parent_dir};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{NeonError, NeonResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::flatten_premul_over_bg_to_opaque_rgba8;

const FFMPEG: &str = "ffmpeg";

/// Where and how [`FfmpegSink`] writes its MP4.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Target `.mp4` file.
    pub out_path: PathBuf,
    /// Replace `out_path` when it already exists; otherwise `begin` fails.
    pub overwrite: bool,
    /// Opaque color the translucent glow is composited over.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    /// Black background, replacing any existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::BLACK,
        }
    }
}

/// H.264 MP4 output through a system `ffmpeg` reading raw RGBA on stdin.
///
/// Dropping the sink before [`FrameSink::end`] kills the encoder and leaves a partial file.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    order: FrameOrder,
}

/// A running `ffmpeg` child and the buffer each frame is flattened into.
struct Encoder {
    cfg: SinkConfig,
    child: Child,
    opaque: Vec<u8>,
}

impl Encoder {
    fn spawn(cfg: SinkConfig, opts: &FfmpegSinkOpts) -> NeonResult<Self> {
        let child = Command::new(FFMPEG)
            .args(encoder_args(&cfg, opts))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NeonError::encode(format!("could not start {FFMPEG}: {e}")))?;
        Ok(Self {
            cfg,
            child,
            opaque: vec![0; cfg.width as usize * cfg.height as usize * 4],
        })
    }

    fn write(&mut self, frame: &FrameRGBA, background: Rgba8) -> NeonResult<()> {
        flatten_premul_over_bg_to_opaque_rgba8(
            &mut self.opaque,
            &frame.data,
            background.to_premul(),
        )?;
        let stdin = self
            .child
            .stdin
            .as_mut()
            .ok_or_else(|| NeonError::encode("ffmpeg stdin is closed"))?;
        stdin
            .write_all(&self.opaque)
            .map_err(|e| NeonError::encode(format!("ffmpeg stopped reading frames: {e}")))
    }

    /// Close stdin and wait; a non-zero exit reports what ffmpeg printed.
    fn finish(self) -> NeonResult<()> {
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| NeonError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        if output.status.success() {
            return Ok(());
        }
        let log = String::from_utf8_lossy(&output.stderr);
        Err(NeonError::encode(format!(
            "ffmpeg failed ({}): {}",
            output.status,
            log.trim()
        )))
    }

    fn abort(mut self) {
        drop(self.child.stdin.take());
        if let Err(err) = self.child.kill() {
            tracing::debug!(%err, "ffmpeg already exited");
        }
        match self.child.wait() {
            Ok(status) => tracing::debug!(%status, "ffmpeg aborted"),
            Err(err) => tracing::warn!(%err, "could not reap ffmpeg"),
        }
    }
}

/// Command line for encoding `cfg`-sized raw RGBA from stdin into `opts.out_path`.
pub(crate) fn encoder_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-hide_banner",
        "-nostats",
        "-loglevel",
        "error",
        if opts.overwrite { "-y" } else { "-n" },
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push("-video_size".into());
    args.push(format!("{}x{}", cfg.width, cfg.height).into());
    args.push("-framerate".into());
    args.push(format!("{}/{}", cfg.fps.num, cfg.fps.den).into());
    args.extend(
        [
            "-i",
            "-",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .map(OsString::from),
    );
    args.push(opts.out_path.clone().into_os_string());
    args
}

/// yuv420p needs even dimensions; a zero size or rate has nothing to encode.
pub(crate) fn validate_video_config(cfg: &SinkConfig) -> NeonResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(NeonError::validation(format!(
            "video frame rate {}/{} is not usable",
            cfg.fps.num, cfg.fps.den
        )));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(NeonError::validation("video frames need a non-zero size"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(NeonError::validation(format!(
            "video size {}x{} must be even in both dimensions",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

impl FfmpegSink {
    /// Sink that spawns `ffmpeg` on [`FrameSink::begin`].
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            order: FrameOrder::default(),
        }
    }

    /// Whether an encoder process is currently running.
    pub fn is_encoding(&self) -> bool {
        self.encoder.is_some()
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(level = "debug", skip(self), fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> NeonResult<()> {
        if let Some(previous) = self.encoder.take() {
            tracing::warn!("begin called while encoding; dropping the unfinished video");
            previous.abort();
        }
        validate_video_config(&cfg)?;
        let out = &self.opts.out_path;
        if !self.opts.overwrite && out.exists() {
            return Err(NeonError::validation(format!("{} already exists", out.display())));
        }
        ensure_parent_dir(out)?;
        if !is_ffmpeg_on_path() {
            return Err(NeonError::encode(
                "MP4 output needs an ffmpeg executable on PATH",
            ));
        }

        self.encoder = Some(Encoder::spawn(cfg, &self.opts)?);
        self.order.reset();
        tracing::debug!(width = cfg.width, height = cfg.height, "ffmpeg started");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> NeonResult<()> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| NeonError::encode("ffmpeg sink is not encoding"))?;
        check_frame_size(&encoder.cfg, frame)?;
        self.order.accept(idx)?;

        let Err(write_err) = encoder.write(frame, self.opts.background) else {
            return Ok(());
        };
        // A broken pipe usually means ffmpeg exited; its own message says why.
        match self.encoder.take().map(Encoder::finish) {
            Some(Err(exit_err)) => Err(exit_err),
            _ => Err(write_err),
        }
    }

    fn end(&mut self) -> NeonResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| NeonError::encode("ffmpeg sink is not encoding"))?;
        encoder.finish()?;
        tracing::debug!(out = %self.opts.out_path.display(), "video written");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            encoder.abort();
        }
    }
}

/// Whether `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new(FFMPEG)
        .arg("-version")
        .output()
        .is_ok_and(|out| out.status.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
