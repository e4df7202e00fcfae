use super::*;
use crate::geometry::heart::{HeartLayout, generate_heart_outline};
use crate::render::recording::{DrawOp, RecordingSurface};

fn outline() -> HeartOutline {
    HeartLayout::for_surface(400.0, 300.0).outline()
}

#[test]
fn sparkles_sit_on_evenly_spaced_points() {
    let outline = outline();
    let indices: Vec<usize> = (0..15)
        .map(|i| {
            let s = sparkle_at(&outline, i, 15, 0.0).unwrap();
            outline.points().iter().position(|p| *p == s.center).unwrap()
        })
        .collect();
    assert_eq!(indices[0], 0);
    assert_eq!(indices[1], 13);
    assert_eq!(indices[14], 187);
}

#[test]
fn phase_drives_radius_opacity_and_rays() {
    let outline = outline();
    let s = sparkle_at(&outline, 0, 15, 0.0).unwrap();
    assert_eq!(s.radius, 2.0);
    assert_eq!(s.opacity, 0.5);
    let first_ray = s.ray_ends[0] - s.center;
    assert!((first_ray.x - 8.0).abs() < 1e-12);
    assert!(first_ray.y.abs() < 1e-12);

    // Sparkle 1 is staggered by 200ms.
    let a = sparkle_at(&outline, 1, 15, 0.0).unwrap();
    let phase = 0.2f64;
    assert!((a.radius - (2.0 + 1.5 * phase.sin())).abs() < 1e-12);
    assert!((a.opacity - (0.5 + 0.5 * phase.sin())).abs() < 1e-12);
    for (j, end) in a.ray_ends.iter().enumerate() {
        let v = *end - a.center;
        let len = 8.0 + 4.0 * phase.sin();
        assert!((v.hypot() - len).abs() < 1e-9);
        let angle = j as f64 * std::f64::consts::FRAC_PI_2 + phase;
        assert!((v.x - angle.cos() * len).abs() < 1e-9);
    }
}

#[test]
fn sparkles_are_deterministic_in_time() {
    let outline = outline();
    for i in 0..15 {
        assert_eq!(
            sparkle_at(&outline, i, 15, 1234.5),
            sparkle_at(&outline, i, 15, 1234.5)
        );
    }
}

#[test]
fn draw_emits_dot_and_four_rays_per_sparkle() {
    let outline = outline();
    let mut s = RecordingSurface::new(400.0, 300.0);
    s.acquire().unwrap();
    draw_sparkles(&mut s, &outline, 500.0, DEFAULT_SPARKLES);

    assert_eq!(
        s.count(|op| matches!(op, DrawOp::FillCircle { .. })),
        DEFAULT_SPARKLES
    );
    assert_eq!(
        s.count(|op| matches!(op, DrawOp::StrokeLine { .. })),
        DEFAULT_SPARKLES * SPARKLE_RAYS
    );
    assert!(s.stroke_styles().iter().all(|st| st.width == 1.0));
}

#[test]
fn empty_inputs_draw_nothing() {
    let mut s = RecordingSurface::new(10.0, 10.0);
    s.acquire().unwrap();
    let empty = generate_heart_outline(Point::ZERO, 1.0, 0);
    draw_sparkles(&mut s, &outline(), 0.0, 0);
    assert!(s.ops().is_empty());

    // A one-point outline still hosts every sparkle on that point.
    draw_sparkles(&mut s, &empty, 0.0, 3);
    assert_eq!(s.count(|op| matches!(op, DrawOp::FillCircle { .. })), 3);
    assert!(sparkle_at(&empty, 3, 3, 0.0).is_none());
}
