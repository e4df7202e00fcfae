use crate::foundation::core::{Point, Rgba8};
use crate::geometry::heart::HeartOutline;
use crate::render::style::{Shadow, StrokeStyle};
use crate::render::surface::Surface;

/// Number of stacked strokes per glow segment.
pub const GLOW_PASS_COUNT: usize = 7;

struct GlowPass {
    width: f64,
    blur: f64,
    stroke: Rgba8,
    shadow: Rgba8,
}

const HOT_PINK: Rgba8 = Rgba8::rgb(255, 0, 128);

// Outermost first: widest, blurriest, most transparent magenta down to a thin white core.
const GLOW_PASSES: [GlowPass; GLOW_PASS_COUNT] = [
    GlowPass {
        width: 20.0,
        blur: 50.0,
        stroke: Rgba8::rgba(255, 0, 128, 102),
        shadow: HOT_PINK,
    },
    GlowPass {
        width: 16.0,
        blur: 40.0,
        stroke: Rgba8::rgba(255, 0, 128, 153),
        shadow: HOT_PINK,
    },
    GlowPass {
        width: 12.0,
        blur: 30.0,
        stroke: HOT_PINK,
        shadow: Rgba8::rgb(255, 20, 147),
    },
    GlowPass {
        width: 8.0,
        blur: 20.0,
        stroke: Rgba8::rgb(255, 51, 170),
        shadow: Rgba8::rgb(255, 51, 170),
    },
    GlowPass {
        width: 5.0,
        blur: 15.0,
        stroke: Rgba8::rgb(255, 153, 221),
        shadow: Rgba8::rgb(255, 102, 204),
    },
    GlowPass {
        width: 2.0,
        blur: 10.0,
        stroke: Rgba8::WHITE,
        shadow: Rgba8::WHITE,
    },
    GlowPass {
        width: 1.0,
        blur: 5.0,
        stroke: Rgba8::WHITE,
        shadow: Rgba8::WHITE,
    },
];

/// Stroke styles for the glow passes at `intensity`, outermost first.
///
/// Widths and blur radii scale linearly with `intensity`; colors do not. A non-finite or negative
/// intensity is treated as 0.
pub fn glow_passes(intensity: f64) -> [StrokeStyle; GLOW_PASS_COUNT] {
    let k = if intensity.is_finite() {
        intensity.max(0.0)
    } else {
        0.0
    };
    GLOW_PASSES.each_ref().map(|pass| {
        StrokeStyle::new(pass.stroke, pass.width * k).with_shadow(Shadow {
            blur: pass.blur * k,
            color: pass.shadow,
        })
    })
}

/// Draw one neon segment as [`GLOW_PASS_COUNT`] stacked strokes.
pub fn draw_glow_segment<S: Surface + ?Sized>(
    surface: &mut S,
    p1: Point,
    p2: Point,
    intensity: f64,
) {
    for style in glow_passes(intensity) {
        surface.stroke_line(p1, p2, &style);
    }
}

/// Draw every segment of `outline` at one intensity.
pub fn draw_glow_outline<S: Surface + ?Sized>(
    surface: &mut S,
    outline: &HeartOutline,
    intensity: f64,
) {
    let passes = glow_passes(intensity);
    for (p1, p2) in outline.segments() {
        for style in &passes {
            surface.stroke_line(p1, p2, style);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glow.rs"]
mod tests;
