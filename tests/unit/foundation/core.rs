use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frame_duration_ms() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frame_duration_ms() - 1000.0 / 60.0).abs() < 1e-12);
    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn opacity_maps_to_alpha_byte() {
    let c = Rgba8::rgb(255, 0, 128);
    assert_eq!(c.with_opacity(0.4).a, 102);
    assert_eq!(c.with_opacity(0.6).a, 153);
    assert_eq!(c.with_opacity(2.0).a, 255);
    assert_eq!(c.with_opacity(-1.0).a, 0);
    assert_eq!(c.with_opacity(f64::NAN).a, 0);
}

#[test]
fn scale_alpha_multiplies() {
    let c = Rgba8::WHITE.with_opacity(0.5);
    assert_eq!(c.scale_alpha(0.6).a, (0.5f64 * 0.6 * 255.0).round() as u8);
}

#[test]
fn premul_of_opaque_is_identity() {
    assert_eq!(Rgba8::rgb(1, 2, 3).to_premul(), [1, 2, 3, 255]);
    assert_eq!(Rgba8::rgba(255, 255, 255, 0).to_premul(), [0, 0, 0, 0]);
}
