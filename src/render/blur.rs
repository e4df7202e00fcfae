use crate::foundation::error::{NeonError, NeonResult};

/// Number of box passes used to approximate a Gaussian.
const BOX_PASSES: usize = 3;

/// Box radii whose repeated application approximates a Gaussian of `sigma`.
///
/// Uses the standard "ideal averaging filter width" split between two odd box widths.
pub(crate) fn box_radii_for_gaussian(sigma: f64) -> [u32; BOX_PASSES] {
    if !sigma.is_finite() || sigma <= 0.0 {
        return [0; BOX_PASSES];
    }
    let n = BOX_PASSES as f64;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f64;
    let m = ((12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0))
        .round()
        .clamp(0.0, n) as usize;

    let mut radii = [0u32; BOX_PASSES];
    for (i, r) in radii.iter_mut().enumerate() {
        let w = if i < m { wl } else { wu };
        *r = ((w - 1) / 2) as u32;
    }
    radii
}

/// Total pixel reach of a blur of `sigma`: how far energy can travel from its source.
pub(crate) fn blur_extent(sigma: f64) -> u32 {
    box_radii_for_gaussian(sigma).iter().sum()
}

/// Gaussian-approximating blur of a premultiplied RGBA8 buffer, in place.
///
/// Pixels outside the buffer count as transparent, which matches how a shadow fades into an
/// empty canvas. `scratch` is reused across calls to avoid reallocating.
pub(crate) fn blur_rgba8_premul(
    buf: &mut [u8],
    width: u32,
    height: u32,
    sigma: f64,
    scratch: &mut Vec<u8>,
) -> NeonResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| NeonError::render("blur buffer size overflow"))?;
    if buf.len() != expected_len {
        return Err(NeonError::render(
            "blur_rgba8_premul expects buf matching width*height*4",
        ));
    }

    let radii = box_radii_for_gaussian(sigma);
    if radii.iter().all(|&r| r == 0) || expected_len == 0 {
        return Ok(());
    }

    scratch.clear();
    scratch.resize(expected_len, 0);
    for r in radii {
        if r == 0 {
            continue;
        }
        horizontal_pass(buf, scratch, width, height, r);
        vertical_pass(scratch, buf, width, height, r);
    }
    Ok(())
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as i64;
    let r = i64::from(radius);
    let div = (2 * r + 1) as u32;
    for y in 0..height as i64 {
        let row = (y * w) as usize * 4;
        let mut acc = [0u32; 4];
        for x in 0..=r.min(w - 1) {
            let idx = row + (x as usize) * 4;
            for c in 0..4 {
                acc[c] += u32::from(src[idx + c]);
            }
        }
        for x in 0..w {
            let out = row + (x as usize) * 4;
            for c in 0..4 {
                dst[out + c] = div_round(acc[c], div);
            }
            let enter = x + r + 1;
            if enter < w {
                let idx = row + (enter as usize) * 4;
                for c in 0..4 {
                    acc[c] += u32::from(src[idx + c]);
                }
            }
            let leave = x - r;
            if leave >= 0 {
                let idx = row + (leave as usize) * 4;
                for c in 0..4 {
                    acc[c] -= u32::from(src[idx + c]);
                }
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as usize;
    let h = height as i64;
    let r = i64::from(radius);
    let div = (2 * r + 1) as u32;
    for x in 0..w {
        let mut acc = [0u32; 4];
        for y in 0..=r.min(h - 1) {
            let idx = ((y as usize) * w + x) * 4;
            for c in 0..4 {
                acc[c] += u32::from(src[idx + c]);
            }
        }
        for y in 0..h {
            let out = ((y as usize) * w + x) * 4;
            for c in 0..4 {
                dst[out + c] = div_round(acc[c], div);
            }
            let enter = y + r + 1;
            if enter < h {
                let idx = ((enter as usize) * w + x) * 4;
                for c in 0..4 {
                    acc[c] += u32::from(src[idx + c]);
                }
            }
            let leave = y - r;
            if leave >= 0 {
                let idx = ((leave as usize) * w + x) * 4;
                for c in 0..4 {
                    acc[c] -= u32::from(src[idx + c]);
                }
            }
        }
    }
}

fn div_round(sum: u32, div: u32) -> u8 {
    ((sum + div / 2) / div).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
