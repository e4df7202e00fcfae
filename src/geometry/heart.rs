use crate::foundation::core::Point;
use std::f64::consts::TAU;

/// Default number of parameter steps; the outline then holds `DEFAULT_STEPS + 1` points.
pub const DEFAULT_STEPS: usize = 200;

/// The heart spans roughly 32 scale units across, so `min(w, h) / 40` leaves a margin.
const SCALE_DIVISOR: f64 = 40.0;

/// Placement of the heart on a surface: center plus curve scale, both in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeartLayout {
    /// Curve center.
    pub center: Point,
    /// Multiplier applied to the unit heart curve.
    pub scale: f64,
}

impl HeartLayout {
    /// Center the heart on a `width x height` logical surface and size it to fit.
    pub fn for_surface(width: f64, height: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            scale: width.min(height) / SCALE_DIVISOR,
        }
    }

    /// Generate the outline with [`DEFAULT_STEPS`].
    pub fn outline(self) -> HeartOutline {
        generate_heart_outline(self.center, self.scale, DEFAULT_STEPS)
    }
}

/// Ordered points tracing one closed heart curve.
///
/// Consecutive points form the segments that get revealed one per frame while drawing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeartOutline {
    points: Vec<Point>,
}

impl HeartOutline {
    /// All points in curve order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the outline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of line segments between consecutive points.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Segment `i`, from point `i` to point `i + 1`.
    pub fn segment(&self, i: usize) -> Option<(Point, Point)> {
        let a = *self.points.get(i)?;
        let b = *self.points.get(i + 1)?;
        Some((a, b))
    }

    /// Iterate segments in curve order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Evaluate the heart curve at parameter `t` (radians).
pub fn heart_point(center: Point, scale: f64, t: f64) -> Point {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    // Screen space grows downward, so the curve's y is flipped.
    Point::new(center.x + scale * x, center.y - scale * y)
}

/// Sample the heart curve at `steps + 1` evenly spaced parameters over `[0, 2*pi]`.
///
/// Both ends are included, so the first and last points coincide and the outline is closed.
/// `steps == 0` yields the single point at `t = 0`. A non-positive `scale` collapses or mirrors
/// the curve around `center` without failing.
#[tracing::instrument(level = "debug")]
pub fn generate_heart_outline(center: Point, scale: f64, steps: usize) -> HeartOutline {
    let points = (0..=steps)
        .map(|i| {
            let t = if steps == 0 {
                0.0
            } else {
                (i as f64 / steps as f64) * TAU
            };
            heart_point(center, scale, t)
        })
        .collect();
    HeartOutline { points }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/heart.rs"]
mod tests;
