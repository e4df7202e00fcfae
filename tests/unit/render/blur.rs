use super::*;

#[test]
fn zero_sigma_is_identity() {
    let mut buf = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let mut scratch = Vec::new();
    blur_rgba8_premul(&mut buf, 1, 2, 0.0, &mut scratch).unwrap();
    assert_eq!(buf, vec![1u8, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn rejects_mismatched_buffer() {
    let mut buf = vec![0u8; 7];
    let mut scratch = Vec::new();
    assert!(blur_rgba8_premul(&mut buf, 1, 2, 2.0, &mut scratch).is_err());
}

#[test]
fn box_radii_track_sigma() {
    assert_eq!(box_radii_for_gaussian(0.0), [0, 0, 0]);
    assert_eq!(box_radii_for_gaussian(f64::NAN), [0, 0, 0]);
    let extent = blur_extent(25.0);
    assert!((70..=80).contains(&extent), "extent {extent}");
    assert!(blur_extent(10.0) < blur_extent(20.0));
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (21u32, 21u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let center = ((10 * w + 10) * 4) as usize;
    buf[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let mut scratch = Vec::new();

    // Use a bright 3x3 block so rounding does not swallow the spread.
    for dy in 0..3u32 {
        for dx in 0..3u32 {
            let idx = (((9 + dy) * w + 9 + dx) * 4) as usize;
            buf[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
    }
    let before: u32 = buf.chunks_exact(4).map(|px| u32::from(px[3])).sum();

    blur_rgba8_premul(&mut buf, w, h, 1.5, &mut scratch).unwrap();

    let nonzero = buf.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 9);

    let after: u32 = buf.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    let diff = (i64::from(after) - i64::from(before)).abs();
    assert!(diff <= i64::from(before) / 10, "before {before} after {after}");
}

#[test]
fn blur_keeps_interior_of_constant_image() {
    let (w, h) = (40u32, 40u32);
    let px = [10u8, 20, 30, 40];
    let mut buf = px.repeat((w * h) as usize);
    let mut scratch = Vec::new();
    blur_rgba8_premul(&mut buf, w, h, 2.0, &mut scratch).unwrap();
    let mid = ((20 * w + 20) * 4) as usize;
    assert_eq!(&buf[mid..mid + 4], &px);
    // Edges fade toward transparent outside the buffer.
    assert!(buf[3] < 40);
}
