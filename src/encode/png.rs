use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, check_frame_size, ensure_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{NeonError, NeonResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::unpremultiply_rgba8_in_place;

/// Write one frame as a straight-alpha PNG, creating parent directories as needed.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> NeonResult<()> {
    ensure_parent_dir(path)?;
    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut straight);
    }
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
///
/// The file name carries the frame index, so gaps in the index sequence show up as gaps in
/// the numbering.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            order: FrameOrder::default(),
            written: Vec::new(),
        }
    }

    /// Path used for frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }

    /// Files written since the last `begin`.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> NeonResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(NeonError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        self.cfg = Some(cfg);
        self.order.reset();
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> NeonResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| NeonError::encode("png sink not started"))?;
        check_frame_size(cfg, frame)?;
        self.order.accept(idx)?;

        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        tracing::trace!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> NeonResult<()> {
        if self.cfg.take().is_none() {
            return Err(NeonError::encode("png sink not started"));
        }
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
