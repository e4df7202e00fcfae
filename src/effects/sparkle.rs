use crate::foundation::core::{Point, Rgba8};
use crate::geometry::heart::HeartOutline;
use crate::render::style::{FillStyle, Shadow, StrokeStyle};
use crate::render::surface::Surface;
use std::f64::consts::FRAC_PI_2;

/// Default number of sparkles spread along the outline.
pub const DEFAULT_SPARKLES: usize = 15;

/// Rays per sparkle.
pub const SPARKLE_RAYS: usize = 4;

const STAGGER_MS: f64 = 200.0;
const GLOW_BLUR: f64 = 20.0;
const RAY_WIDTH: f64 = 1.0;
const RAY_OPACITY: f64 = 0.6;

/// Geometry and opacity of one sparkle at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    /// Outline point the sparkle sits on.
    pub center: Point,
    /// Radius of the dot.
    pub radius: f64,
    /// Dot opacity in `[0, 1]`.
    pub opacity: f64,
    /// Outer end of each ray; rays start at `center`.
    pub ray_ends: [Point; SPARKLE_RAYS],
}

/// Sparkle `i` of `count` at `elapsed_ms`, or `None` when there is nothing to place it on.
///
/// Sparkle `i` sits on outline point `floor(i / count * len)`. Its phase is offset by
/// `i * 200ms` so neighbours pulse out of step.
pub fn sparkle_at(
    outline: &HeartOutline,
    i: usize,
    count: usize,
    elapsed_ms: f64,
) -> Option<Sparkle> {
    if count == 0 || i >= count {
        return None;
    }
    let index = ((i as f64 / count as f64) * outline.len() as f64).floor() as usize;
    let center = *outline.points().get(index)?;

    let phase = (elapsed_ms + i as f64 * STAGGER_MS) / 1000.0;
    let wave = phase.sin();
    let ray_len = 8.0 + 4.0 * wave;
    let ray_ends = std::array::from_fn(|j| {
        let angle = j as f64 * FRAC_PI_2 + phase;
        Point::new(
            center.x + angle.cos() * ray_len,
            center.y + angle.sin() * ray_len,
        )
    });

    Some(Sparkle {
        center,
        radius: 2.0 + 1.5 * wave,
        opacity: 0.5 + 0.5 * wave,
        ray_ends,
    })
}

/// Draw `count` pulsing sparkles along `outline`.
pub fn draw_sparkles<S: Surface + ?Sized>(
    surface: &mut S,
    outline: &HeartOutline,
    elapsed_ms: f64,
    count: usize,
) {
    let glow = Shadow {
        blur: GLOW_BLUR,
        color: Rgba8::WHITE,
    };
    for i in 0..count {
        let Some(sparkle) = sparkle_at(outline, i, count, elapsed_ms) else {
            continue;
        };

        let dot = FillStyle::new(Rgba8::WHITE.with_opacity(sparkle.opacity)).with_shadow(glow);
        surface.fill_circle(sparkle.center, sparkle.radius, &dot);

        let ray = StrokeStyle::new(
            Rgba8::WHITE.with_opacity(sparkle.opacity * RAY_OPACITY),
            RAY_WIDTH,
        )
        .with_shadow(glow);
        for end in sparkle.ray_ends {
            surface.stroke_line(sparkle.center, end, &ray);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sparkle.rs"]
mod tests;
