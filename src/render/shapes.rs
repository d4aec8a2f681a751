use kurbo::{Affine, BezPath, PathEl, Point, Rect, RoundedRect, Shape, Vec2};

use crate::foundation::core::{MAX_CANVAS_EDGE, Rgba8};
use crate::render::canvas::Canvas;

const PATH_TOLERANCE: f64 = 0.1;

impl Canvas {
    /// Fill an axis-aligned rectangle, optionally with rounded corners.
    ///
    /// A zero `corner_radius` fills the pixel grid directly (covered pixels are those whose centers
    /// fall inside `rect`); a positive radius is rasterized with antialiasing.
    pub fn fill_rect(&mut self, rect: Rect, color: impl Into<Rgba8>, corner_radius: f64) {
        let color = color.into();
        let rect = rect.abs();
        if color.a == 0 || rect.is_zero_area() {
            return;
        }
        if corner_radius <= 0.0 {
            self.fill_pixel_rect(rect, color);
            return;
        }
        let radius = corner_radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
        let shape = RoundedRect::from_rect(rect, radius);
        self.fill_path(&shape.to_path(PATH_TOLERANCE), color);
    }

    /// Fill an axis-aligned ellipse centered on `center`.
    pub fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: impl Into<Rgba8>) {
        let color = color.into();
        if color.a == 0 || !(rx > 0.0 && ry > 0.0) {
            return;
        }
        let shape = kurbo::Ellipse::new(center, Vec2::new(rx, ry), 0.0);
        self.fill_path(&shape.to_path(PATH_TOLERANCE), color);
    }

    /// Fill a closed polygon; fewer than three points draws nothing.
    pub fn fill_polygon(&mut self, points: &[Point], color: impl Into<Rgba8>) {
        let color = color.into();
        if color.a == 0 || points.len() < 3 {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(points[0]);
        for &p in &points[1..] {
            path.line_to(p);
        }
        path.close_path();
        self.fill_path(&path, color);
    }

    /// Draw a straight segment `width` pixels thick with butt ends.
    pub fn draw_line(&mut self, p0: Point, p1: Point, width: f64, color: impl Into<Rgba8>) {
        let color = color.into();
        let d = p1 - p0;
        let len = d.hypot();
        if color.a == 0 || !(width > 0.0) || !(len > 0.0) {
            return;
        }
        let n = Vec2::new(-d.y, d.x) * (width / 2.0 / len);
        self.fill_polygon(&[p0 + n, p1 + n, p1 - n, p0 - n], color);
    }

    /// Rounded rectangle with a `width`-pixel outline drawn inside `rect`.
    ///
    /// Painted as the outer shape in `stroke`, then the interior inset by `width` in `fill`; a
    /// translucent `fill` therefore composites over the outline color.
    pub fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        width: f64,
        stroke: impl Into<Rgba8>,
        fill: impl Into<Rgba8>,
    ) {
        let rect = rect.abs();
        let width = width.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
        let radius = radius.max(0.0);
        if width > 0.0 {
            self.fill_rect(rect, stroke, radius);
        }
        self.fill_rect(rect.inset(-width), fill, (radius - width).max(0.0));
    }

    /// Rasterize an arbitrary path with nonzero winding and composite it over the canvas.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        raster_patch(self, path.bounding_box(), |ctx, _| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
            ctx.fill_path(&bezpath_to_cpu(path));
        });
    }

    fn fill_pixel_rect(&mut self, rect: Rect, color: Rgba8) {
        let x0 = rect.x0.round().max(0.0) as i64;
        let y0 = rect.y0.round().max(0.0) as i64;
        let x1 = rect.x1.round().min(f64::from(self.width())) as i64;
        let y1 = rect.y1.round().min(f64::from(self.height())) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }
}

/// Rasterize `draw` into a patch covering `bounds` (clipped to the canvas) and composite it.
///
/// The closure receives a context whose transform already maps canvas coordinates onto the patch,
/// plus that transform so it can compose its own on top.
pub(crate) fn raster_patch(
    canvas: &mut Canvas,
    bounds: Rect,
    draw: impl FnOnce(&mut vello_cpu::RenderContext, Affine),
) {
    let Some((x0, y0, w, h)) = clip_bounds(canvas, bounds) else {
        return;
    };

    let to_patch = Affine::translate((-(x0 as f64), -(y0 as f64)));
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(affine_to_cpu(to_patch));
    draw(&mut ctx, to_patch);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    canvas.blit_premul(x0, y0, u32::from(w), u32::from(h), pixmap.data_as_u8_slice());
}

fn clip_bounds(canvas: &Canvas, bounds: Rect) -> Option<(i64, i64, u16, u16)> {
    if !bounds.is_finite() {
        return None;
    }
    let cw = f64::from(canvas.width().min(MAX_CANVAS_EDGE));
    let ch = f64::from(canvas.height().min(MAX_CANVAS_EDGE));
    let x0 = bounds.x0.floor().max(0.0);
    let y0 = bounds.y0.floor().max(0.0);
    let x1 = (bounds.x1.ceil() + 1.0).min(cw);
    let y1 = (bounds.y1.ceil() + 1.0).min(ch);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0 as i64, y0 as i64, (x1 - x0) as u16, (y1 - y0) as u16))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
