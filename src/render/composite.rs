use crate::foundation::error::{NeonError, NeonResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u16};

/// Premultiplied RGBA8 pixel.
pub(crate) type PremulRgba8 = [u8; 4];

/// Integer pixel rectangle inside a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl PixelRect {
    /// Bounds `[min, max]` (device pixels) grown by `pad`, clipped to a `surface_w x surface_h`
    /// surface. `None` when nothing remains.
    pub(crate) fn around(
        min: (f64, f64),
        max: (f64, f64),
        pad: f64,
        surface_w: u32,
        surface_h: u32,
    ) -> Option<Self> {
        let vals = [min.0, min.1, max.0, max.1, pad];
        if vals.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let x0 = (min.0 - pad).floor().max(0.0);
        let y0 = (min.1 - pad).floor().max(0.0);
        let x1 = (max.0 + pad).ceil().min(f64::from(surface_w));
        let y1 = (max.1 + pad).ceil().min(f64::from(surface_h));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x0: x0 as u32,
            y0: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    pub(crate) fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Source-over for one premultiplied pixel.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(u16::from(src[i]), mul_div255_u16(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a region-sized premultiplied buffer over `dst` (a full `dst_width`-wide surface).
pub(crate) fn over_region(
    dst: &mut [u8],
    dst_width: u32,
    region: PixelRect,
    src: &[u8],
) -> NeonResult<()> {
    if src.len() != region.byte_len() {
        return Err(NeonError::render(
            "over_region expects src matching region width*height*4",
        ));
    }
    let dst_rows = dst.len() / (dst_width as usize * 4).max(1);
    if region.x0 + region.width > dst_width || (region.y0 + region.height) as usize > dst_rows {
        return Err(NeonError::render("composite region exceeds surface bounds"));
    }

    let row_bytes = region.width as usize * 4;
    for (ry, src_row) in src.chunks_exact(row_bytes).enumerate() {
        let y = region.y0 as usize + ry;
        let start = (y * dst_width as usize + region.x0 as usize) * 4;
        let dst_row = &mut dst[start..start + row_bytes];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Flatten premultiplied RGBA8 over an opaque background, producing opaque straight RGBA8.
pub(crate) fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> NeonResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(NeonError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255u16 - a;
        for i in 0..3 {
            d[i] = add_sat_u8(u16::from(s[i]), mul_div255_u16(bg[i], inv));
        }
        d[3] = 255;
    }
    Ok(())
}

/// Convert premultiplied RGBA8 to straight alpha in place.
pub(crate) fn unpremultiply_rgba8_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let v = (u16::from(*c) * 255 + a / 2) / a;
            *c = v.min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
