use super::*;

#[test]
fn over_transparent_src_keeps_dst() {
    assert_eq!(over([1, 2, 3, 4], [0, 0, 0, 0]), [1, 2, 3, 4]);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 255]), [9, 8, 7, 255]);
}

#[test]
fn over_half_alpha_blends() {
    let out = over([0, 0, 0, 255], [128, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
}

#[test]
fn region_is_clipped_to_surface() {
    let r = PixelRect::around((-5.0, -5.0), (3.0, 3.0), 2.0, 10, 10).unwrap();
    assert_eq!((r.x0, r.y0, r.width, r.height), (0, 0, 5, 5));

    assert!(PixelRect::around((50.0, 50.0), (60.0, 60.0), 1.0, 10, 10).is_none());
    assert!(PixelRect::around((f64::NAN, 0.0), (1.0, 1.0), 1.0, 10, 10).is_none());
}

#[test]
fn over_region_writes_only_inside() {
    let mut dst = vec![0u8; 4 * 4 * 4];
    let region = PixelRect {
        x0: 1,
        y0: 2,
        width: 2,
        height: 1,
    };
    let src = vec![255u8; region.byte_len()];
    over_region(&mut dst, 4, region, &src).unwrap();

    let lit: Vec<usize> = dst
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] == 255)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(lit, vec![9, 10]);
}

#[test]
fn over_region_rejects_out_of_bounds() {
    let mut dst = vec![0u8; 4 * 4 * 4];
    let region = PixelRect {
        x0: 3,
        y0: 0,
        width: 2,
        height: 1,
    };
    let src = vec![0u8; region.byte_len()];
    assert!(over_region(&mut dst, 4, region, &src).is_err());
}

#[test]
fn flatten_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![64u8, 32, 0, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[1, 2, 3, 255]);
}
