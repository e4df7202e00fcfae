use crate::foundation::core::Point;
use crate::foundation::error::{NeonError, NeonResult};
use crate::render::style::{FillStyle, StrokeStyle};
use crate::render::surface::{Surface, validate_dimensions};

/// One recorded surface operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// The surface was cleared.
    Clear,
    /// A straight segment was stroked.
    StrokeLine {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Style used.
        style: StrokeStyle,
    },
    /// A circle was filled.
    FillCircle {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Style used.
        style: FillStyle,
    },
    /// A frame's mutations ended.
    Present,
}

/// Surface that records draw calls as a display list instead of producing pixels.
///
/// Useful for asserting exactly what the renderers and the controller emit.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    dpr: f64,
    acquired: bool,
    acquisitions: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create an unacquired surface with device pixel ratio 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dpr: 1.0,
            acquired: false,
            acquisitions: 0,
            ops: Vec::new(),
        }
    }

    /// Device pixel ratio last set through [`Surface::resize`].
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Whether a context is currently held.
    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    /// Number of successful acquisitions so far.
    pub fn acquisitions(&self) -> u32 {
        self.acquisitions
    }

    /// Recorded operations in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Remove and return all recorded operations.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Styles of all recorded strokes in call order.
    pub fn stroke_styles(&self) -> Vec<StrokeStyle> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeLine { style, .. } => Some(*style),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded operations matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    fn record(&mut self, op: DrawOp) {
        if self.acquired {
            self.ops.push(op);
        }
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64, dpr: f64) -> NeonResult<()> {
        validate_dimensions(width, height, dpr)?;
        self.width = width;
        self.height = height;
        self.dpr = dpr;
        if self.acquired {
            self.acquired = false;
            self.acquire()?;
        }
        Ok(())
    }

    fn logical_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn acquire(&mut self) -> NeonResult<()> {
        let usable = self.width.is_finite()
            && self.height.is_finite()
            && self.width * self.dpr >= 1.0
            && self.height * self.dpr >= 1.0;
        if !usable {
            self.acquired = false;
            return Err(NeonError::surface_unavailable(format!(
                "{}x{} at dpr {} has no drawable pixels",
                self.width, self.height, self.dpr
            )));
        }
        self.acquired = true;
        self.acquisitions += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.record(DrawOp::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.record(DrawOp::StrokeLine {
            from,
            to,
            style: *style,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle) {
        self.record(DrawOp::FillCircle {
            center,
            radius,
            style: *style,
        });
    }

    fn present(&mut self) {
        self.record(DrawOp::Present);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
