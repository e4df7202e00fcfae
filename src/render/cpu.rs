use crate::foundation::core::{Affine, Point, Rgba8};
use crate::foundation::error::{NeonError, NeonResult};
use crate::render::backend::FrameRGBA;
use crate::render::blur::{blur_extent, blur_rgba8_premul};
use crate::render::composite::{PixelRect, over_region};
use crate::render::style::{FillStyle, LineCap, LineJoin, Shadow, StrokeStyle};
use crate::render::surface::{Surface, validate_dimensions};
use vello_cpu::kurbo::Shape as _;

/// Circle flattening tolerance in device pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Options for [`CpuSurface`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CpuSurfaceOpts {
    /// Color the surface is cleared to. Opaque by default so read-back frames are opaque.
    pub background: Rgba8,
    /// Render shadows. Disabling them is much faster and leaves only the crisp strokes.
    pub shadows: bool,
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            shadows: true,
        }
    }
}

impl CpuSurfaceOpts {
    /// Return options with shadow rendering switched on or off.
    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }
}

/// Raster surface powered by `vello_cpu`.
///
/// Holds a premultiplied RGBA8 pixmap of `round(logical * dpr)` device pixels. Every shape is
/// rasterized into a buffer covering only its bounds and composited over the pixmap; shadows are
/// rasterized in the shadow color, blurred, and composited underneath first.
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    logical_w: f64,
    logical_h: f64,
    dpr: f64,
    context: Option<DeviceContext>,
    blur_scratch: Vec<u8>,
}

struct DeviceContext {
    width: u16,
    height: u16,
    transform: Affine,
    pixmap: vello_cpu::Pixmap,
}

enum Geometry {
    Line(Point, Point),
    Circle(Point, f64),
}

impl CpuSurface {
    /// Create an unacquired surface.
    pub fn new(width: f64, height: f64, dpr: f64, opts: CpuSurfaceOpts) -> NeonResult<Self> {
        validate_dimensions(width, height, dpr)?;
        Ok(Self {
            opts,
            logical_w: width,
            logical_h: height,
            dpr,
            context: None,
            blur_scratch: Vec::new(),
        })
    }

    /// Surface options.
    pub fn opts(&self) -> CpuSurfaceOpts {
        self.opts
    }

    /// Device pixel ratio.
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Device pixel size of the current context, if acquired.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        self.context
            .as_ref()
            .map(|c| (u32::from(c.width), u32::from(c.height)))
    }

    /// Copy the current pixels out as a premultiplied frame.
    pub fn snapshot(&self) -> NeonResult<FrameRGBA> {
        let ctx = self
            .context
            .as_ref()
            .ok_or_else(|| NeonError::surface_unavailable("surface has not been acquired"))?;
        Ok(FrameRGBA {
            width: u32::from(ctx.width),
            height: u32::from(ctx.height),
            data: ctx.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw(
        &mut self,
        geom: Geometry,
        stroke: Option<&StrokeStyle>,
        color: Rgba8,
        shadow: Option<Shadow>,
    ) {
        if let Err(err) = self.try_draw(&geom, stroke, color, shadow) {
            tracing::warn!(error = %err, "draw call dropped");
        }
    }

    fn try_draw(
        &mut self,
        geom: &Geometry,
        stroke: Option<&StrokeStyle>,
        color: Rgba8,
        shadow: Option<Shadow>,
    ) -> NeonResult<()> {
        let Some(ctx) = self.context.as_mut() else {
            return Ok(());
        };
        let dpr = self.dpr;

        let (path, min, max, reach) = match *geom {
            Geometry::Line(a, b) => {
                let Some(style) = stroke else {
                    return Ok(());
                };
                let width = style.width * dpr;
                if !width.is_finite() || width <= 0.0 {
                    return Ok(());
                }
                let a = ctx.transform * a;
                let b = ctx.transform * b;
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(a));
                path.line_to(point_to_cpu(b));
                let min = (a.x.min(b.x), a.y.min(b.y));
                let max = (a.x.max(b.x), a.y.max(b.y));
                // Square caps reach furthest: half the diagonal of the cap square.
                (path, min, max, width * std::f64::consts::FRAC_1_SQRT_2 + 1.0)
            }
            Geometry::Circle(c, r) => {
                let r = r * dpr;
                if !r.is_finite() || r <= 0.0 {
                    return Ok(());
                }
                let c = ctx.transform * c;
                let path =
                    vello_cpu::kurbo::Circle::new(point_to_cpu(c), r).to_path(CIRCLE_TOLERANCE);
                (path, (c.x - r, c.y - r), (c.x + r, c.y + r), 1.0)
            }
        };
        let cpu_stroke = stroke.map(|s| stroke_to_cpu(s, dpr));

        if self.opts.shadows
            && let Some(shadow) = shadow.filter(Shadow::is_visible)
        {
            let sigma = shadow.blur * dpr / 2.0;
            let pad = reach + f64::from(blur_extent(sigma)) + 1.0;
            if let Some(region) =
                PixelRect::around(min, max, pad, u32::from(ctx.width), u32::from(ctx.height))
            {
                let tint = shadow.color.scale_alpha(f64::from(color.a) / 255.0);
                let mut layer = rasterize_region(region, &path, cpu_stroke.as_ref(), tint)?;
                blur_rgba8_premul(
                    &mut layer,
                    region.width,
                    region.height,
                    sigma,
                    &mut self.blur_scratch,
                )?;
                over_region(
                    ctx.pixmap.data_as_u8_slice_mut(),
                    u32::from(ctx.width),
                    region,
                    &layer,
                )?;
            }
        }

        if color.is_transparent() {
            return Ok(());
        }
        if let Some(region) =
            PixelRect::around(min, max, reach, u32::from(ctx.width), u32::from(ctx.height))
        {
            let layer = rasterize_region(region, &path, cpu_stroke.as_ref(), color)?;
            over_region(
                ctx.pixmap.data_as_u8_slice_mut(),
                u32::from(ctx.width),
                region,
                &layer,
            )?;
        }
        Ok(())
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, width: f64, height: f64, dpr: f64) -> NeonResult<()> {
        validate_dimensions(width, height, dpr)?;
        self.logical_w = width;
        self.logical_h = height;
        self.dpr = dpr;
        if self.context.is_some() {
            self.context = None;
            self.acquire()?;
        }
        Ok(())
    }

    fn logical_size(&self) -> (f64, f64) {
        (self.logical_w, self.logical_h)
    }

    fn acquire(&mut self) -> NeonResult<()> {
        self.context = None;
        let width = device_extent(self.logical_w, self.dpr)?;
        let height = device_extent(self.logical_h, self.dpr)?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        fill_pixmap(&mut pixmap, self.opts.background.to_premul());
        self.context = Some(DeviceContext {
            width,
            height,
            transform: Affine::scale(self.dpr),
            pixmap,
        });
        tracing::trace!(width, height, dpr = self.dpr, "cpu surface acquired");
        Ok(())
    }

    fn clear(&mut self) {
        let bg = self.opts.background.to_premul();
        if let Some(ctx) = self.context.as_mut() {
            fill_pixmap(&mut ctx.pixmap, bg);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.draw(Geometry::Line(from, to), Some(style), style.color, style.shadow);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle) {
        self.draw(
            Geometry::Circle(center, radius),
            None,
            style.color,
            style.shadow,
        );
    }
}

fn device_extent(logical: f64, dpr: f64) -> NeonResult<u16> {
    let px = (logical * dpr).round();
    if !px.is_finite() || px < 1.0 {
        return Err(NeonError::surface_unavailable(format!(
            "logical extent {logical} at dpr {dpr} has no device pixels"
        )));
    }
    if px > f64::from(u16::MAX) {
        return Err(NeonError::surface_unavailable(format!(
            "device extent {px} exceeds u16"
        )));
    }
    Ok(px as u16)
}

fn fill_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn rasterize_region(
    region: PixelRect,
    path: &vello_cpu::kurbo::BezPath,
    stroke: Option<&vello_cpu::kurbo::Stroke>,
    color: Rgba8,
) -> NeonResult<Vec<u8>> {
    let w: u16 = region
        .width
        .try_into()
        .map_err(|_| NeonError::render("region width exceeds u16"))?;
    let h: u16 = region
        .height
        .try_into()
        .map_err(|_| NeonError::render("region height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        -f64::from(region.x0),
        -f64::from(region.y0),
    )));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    match stroke {
        Some(stroke) => {
            ctx.set_stroke(stroke.clone());
            ctx.stroke_path(path);
        }
        None => ctx.fill_path(path),
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn stroke_to_cpu(style: &StrokeStyle, dpr: f64) -> vello_cpu::kurbo::Stroke {
    let cap = match style.cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
        LineCap::Square => vello_cpu::kurbo::Cap::Square,
    };
    let join = match style.join {
        LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
        LineJoin::Round => vello_cpu::kurbo::Join::Round,
        LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
    };
    vello_cpu::kurbo::Stroke::new(style.width * dpr)
        .with_caps(cap)
        .with_join(join)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
