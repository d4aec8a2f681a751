use chrono::NaiveDate;
use kurbo::{Point, Rect};

use crate::compose::job::{MarkKind, RenderCx};
use crate::config::DecorOpts;
use crate::foundation::core::{CanvasSize, Rgb8, Rgba8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::foundation::math::SplitMix64;
use crate::render::canvas::Canvas;
use crate::render::gradient::fill_vertical_gradient;
use crate::text::wrap::wrap_text;

/// Emoji the content pipeline prefixes titles with.
const TITLE_DECORATIONS: [char; 8] = ['🔥', '📖', '💡', '⚡', '📊', '🤔', '📚', '\u{FE0F}'];

const SHADOW: Rgba8 = Rgba8::new(0, 0, 0, 128);
const BADGE_FILL: Rgba8 = Rgba8::new(255, 255, 255, 200);

/// Remove decorative emoji and collapse whitespace.
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !TITLE_DECORATIONS.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// One decorative circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    /// Center in canvas pixels.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// White alpha.
    pub alpha: u8,
}

/// Place decorative circles deterministically from `seed`.
///
/// Every circle lies at least one pixel inside the canvas and the summed circle area never exceeds
/// `max_coverage` of the canvas.
pub fn place_decorations(size: CanvasSize, opts: &DecorOpts, seed: u64) -> Vec<Decoration> {
    let mut rng = SplitMix64::new(seed);
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let fit = (w.min(h) / 2.0 - 1.0).max(0.0);

    let mut radii: Vec<f64> = (0..opts.count)
        .map(|_| rng.range_f64(opts.radius_min, opts.radius_max).min(fit))
        .collect();

    let budget = opts.max_coverage.clamp(0.0, 1.0) * w * h;
    let area: f64 = radii.iter().map(|r| std::f64::consts::PI * r * r).sum();
    if area > budget && area > 0.0 {
        let k = (budget / area).sqrt();
        for r in &mut radii {
            *r *= k;
        }
    }

    radii
        .into_iter()
        .filter(|r| *r > 0.0)
        .map(|radius| {
            let x = rng.range_f64(radius + 1.0, w - radius - 1.0);
            let y = rng.range_f64(radius + 1.0, h - radius - 1.0);
            let alpha = rng.range_inclusive(u32::from(opts.alpha_min), u32::from(opts.alpha_max));
            Decoration {
                center: Point::new(x, y),
                radius,
                alpha: alpha.min(255) as u8,
            }
        })
        .collect()
}

/// Draw a cover: gradient, decorations, wrapped title, optional badge and date stamp.
pub(crate) fn compose(
    cx: &mut RenderCx<'_>,
    size: CanvasSize,
    title: &str,
    label: Option<&str>,
    date: NaiveDate,
    seed: u64,
) -> CovergenResult<Canvas> {
    let title = clean_title(title);
    if title.is_empty() {
        return Err(CovergenError::validation("cover title must not be blank"));
    }

    let mut canvas = Canvas::with_size(size, cx.style.gradient_start)?;
    fill_vertical_gradient(&mut canvas, cx.style.gradient_start, cx.style.gradient_end);

    for d in place_decorations(size, &cx.opts.decor, seed) {
        canvas.fill_ellipse(d.center, d.radius, d.radius, Rgb8::WHITE.with_alpha(d.alpha));
        cx.mark(
            MarkKind::Decoration,
            Rect::from_center_size(d.center, (d.radius * 2.0, d.radius * 2.0)),
        );
    }

    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let title_font = cx.fonts.title.clone();
    let body_font = cx.fonts.body.clone();

    let bound = w - 2.0 * f64::from(cx.opts.margin);
    let block = wrap_text(&mut cx.engine, &title, &title_font, bound)?;
    let line_h = title_font.line_height();
    let mut y = ((h - block.height()) / 2.0).max(0.0);
    for (line, lw) in block.lines().iter().zip(block.widths()) {
        let x = (w - lw) / 2.0;
        cx.draw_text(&mut canvas, x + 2.0, y + 2.0, line, &title_font, SHADOW)?;
        cx.draw_text(&mut canvas, x, y, line, &title_font, Rgb8::WHITE)?;
        cx.mark(MarkKind::TitleLine, Rect::new(x, y, x + lw, y + line_h));
        y += line_h;
    }

    if let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) {
        let tw = cx.text_width(label, &body_font)?;
        let bw = (tw + 40.0).max(200.0);
        let bh = (body_font.line_height() + 12.0).max(40.0);
        let badge = Rect::new(w - bw - 20.0, 20.0, w - 20.0, 20.0 + bh);
        canvas.fill_rect(badge, BADGE_FILL, bh / 2.0);
        let ty = badge.y0 + (bh - body_font.line_height()) / 2.0;
        let accent = cx.style.accent;
        cx.draw_centered(&mut canvas, badge.center().x, ty, label, &body_font, accent)?;
        cx.mark(MarkKind::Badge, badge);
    }

    let stamp = date.format("%Y.%m.%d").to_string();
    let tw = cx.text_width(&stamp, &body_font)?;
    let (sx, sy) = (w - tw - 20.0, h - 20.0 - body_font.line_height());
    cx.draw_text(&mut canvas, sx, sy, &stamp, &body_font, Rgb8::WHITE)?;
    cx.mark(
        MarkKind::Date,
        Rect::new(sx, sy, sx + tw, sy + body_font.line_height()),
    );

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/cover.rs"]
mod tests;
