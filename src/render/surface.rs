use crate::foundation::core::Point;
use crate::foundation::error::NeonResult;
use crate::render::style::{FillStyle, StrokeStyle};

/// A 2D immediate-mode raster target.
///
/// Coordinates are logical pixels; implementations map them to device pixels using the device
/// pixel ratio given to [`Surface::resize`]. Drawing before a successful [`Surface::acquire`] is a
/// no-op.
pub trait Surface {
    /// Set the logical size and device pixel ratio. An acquired context is re-acquired, which
    /// clears it.
    fn resize(&mut self, width: f64, height: f64, dpr: f64) -> NeonResult<()>;

    /// Logical `(width, height)`.
    fn logical_size(&self) -> (f64, f64);

    /// Obtain (or reset) the drawable context with the device pixel scale applied.
    ///
    /// Fails with [`crate::NeonError::SurfaceUnavailable`] when no context can be produced for the
    /// current size.
    fn acquire(&mut self) -> NeonResult<()>;

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Stroke the straight segment `from -> to`.
    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Fill a full circle.
    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle);

    /// End of one frame's mutations.
    fn present(&mut self) {}
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn resize(&mut self, width: f64, height: f64, dpr: f64) -> NeonResult<()> {
        (**self).resize(width, height, dpr)
    }

    fn logical_size(&self) -> (f64, f64) {
        (**self).logical_size()
    }

    fn acquire(&mut self) -> NeonResult<()> {
        (**self).acquire()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        (**self).stroke_line(from, to, style);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle) {
        (**self).fill_circle(center, radius, style);
    }

    fn present(&mut self) {
        (**self).present();
    }
}

pub(crate) fn validate_dimensions(width: f64, height: f64, dpr: f64) -> NeonResult<()> {
    use crate::foundation::error::NeonError;

    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(NeonError::validation(format!(
            "surface size must be finite and non-negative, got {width}x{height}"
        )));
    }
    if !dpr.is_finite() || dpr <= 0.0 {
        return Err(NeonError::validation(format!(
            "device pixel ratio must be > 0, got {dpr}"
        )));
    }
    Ok(())
}
