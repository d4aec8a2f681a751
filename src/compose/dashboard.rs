use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::compose::comparison::format_value;
use crate::compose::job::{MarkKind, RenderCx};
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::render::canvas::Canvas;
use crate::style::palette::{SLICE_PALETTE, ink};
use crate::text::wrap::wrap_text;

/// Largest angular step used when flattening pie arcs, in radians.
const ARC_STEP: f64 = std::f64::consts::PI / 90.0;

/// One labeled value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    /// Display label.
    pub label: String,
    /// Non-negative value.
    pub value: f64,
}

impl Datum {
    /// Construct from a label and value.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Share breakdown (pie) next to a popularity ranking (bars).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardData {
    /// Pie slices, drawn counter-clockwise from twelve o'clock.
    pub shares: Vec<Datum>,
    /// Ranked bars; sorted descending before drawing.
    pub ranking: Vec<Datum>,
    /// Heading above the pie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pie_title: Option<String>,
    /// Heading above the bars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bars_title: Option<String>,
    /// Bar axis ceiling; a 1/2/5 step above the largest value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl DashboardData {
    /// Check both tables.
    pub fn validate(&self) -> CovergenResult<()> {
        check_table("shares", &self.shares)?;
        check_table("ranking", &self.ranking)?;
        if self.shares.iter().map(|d| d.value).sum::<f64>() <= 0.0 {
            return Err(CovergenError::invalid_dataset("shares must not all be zero"));
        }
        if let Some(max) = self.max {
            let top = self.ranking.iter().map(|d| d.value).fold(0.0, f64::max);
            if !(max.is_finite() && max > 0.0 && max >= top) {
                return Err(CovergenError::invalid_dataset(format!(
                    "dashboard max {max} must be finite, > 0 and >= the largest ranking value {top}"
                )));
            }
        }
        Ok(())
    }

    /// Ranking sorted by value, largest first; ties keep input order.
    pub fn sorted_ranking(&self) -> Vec<Datum> {
        let mut out = self.ranking.clone();
        out.sort_by(|a, b| b.value.total_cmp(&a.value));
        out
    }
}

fn check_table(name: &str, rows: &[Datum]) -> CovergenResult<()> {
    if rows.is_empty() {
        return Err(CovergenError::invalid_dataset(format!("{name} must not be empty")));
    }
    for (i, d) in rows.iter().enumerate() {
        if d.label.trim().is_empty() {
            return Err(CovergenError::invalid_dataset(format!(
                "{name}[{i}] has a blank label"
            )));
        }
        if !(d.value.is_finite() && d.value >= 0.0) {
            return Err(CovergenError::invalid_dataset(format!(
                "{name}[{i}] value {} must be finite and >= 0",
                d.value
            )));
        }
    }
    Ok(())
}

/// Integer percentages of `values` that sum to exactly 100 (largest-remainder rounding).
///
/// Ties in the remainder go to the earlier entry. All-zero or empty input yields zeros.
pub fn rounded_percentages(values: &[f64]) -> Vec<u32> {
    let total: f64 = values.iter().copied().filter(|v| v.is_finite() && *v > 0.0).sum();
    if values.is_empty() || total <= 0.0 {
        return vec![0; values.len()];
    }
    let exact: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { v / total * 100.0 } else { 0.0 })
        .collect();
    let mut out: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();
    let assigned: u32 = out.iter().sum();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &i in order.iter().take(100u32.saturating_sub(assigned) as usize) {
        out[i] += 1;
    }
    out
}

/// Smallest 1/2/5 x 10^k step at or above `v`.
pub fn nice_ceiling(v: f64) -> f64 {
    if !(v.is_finite() && v > 0.0) {
        return 1.0;
    }
    let mag = 10f64.powf(v.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * mag)
        .find(|c| *c >= v)
        .unwrap_or(10.0 * mag)
}

pub(crate) fn compose(
    cx: &mut RenderCx<'_>,
    size: CanvasSize,
    data: &DashboardData,
) -> CovergenResult<Canvas> {
    data.validate()?;
    let mut canvas = Canvas::with_size(size, Rgb8::WHITE)?;
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let body = cx.fonts.body.clone();
    let body_h = body.line_height();
    let half = w / 2.0;

    let mut top = 20.0;
    for (title, center) in [(&data.pie_title, half / 2.0), (&data.bars_title, half * 1.5)] {
        if let Some(t) = title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let tw = cx.draw_centered(&mut canvas, center, 20.0, t, &body, ink::TEXT)?;
            cx.mark(
                MarkKind::TitleLine,
                Rect::new(center - tw / 2.0, 20.0, center + tw / 2.0, 20.0 + body_h),
            );
            top = 20.0 + body_h;
        }
    }

    draw_pie(cx, &mut canvas, data, Rect::new(0.0, top, half, h))?;
    draw_ranking(cx, &mut canvas, data, Rect::new(half, top, w, h))?;
    Ok(canvas)
}

fn draw_pie(
    cx: &mut RenderCx<'_>,
    canvas: &mut Canvas,
    data: &DashboardData,
    area: Rect,
) -> CovergenResult<()> {
    let body = cx.fonts.body.clone();
    let body_h = body.line_height();
    let center = area.center();
    let radius = (area.width().min(area.height()) / 2.0 - body_h * 2.0 - 20.0).max(10.0);

    let values: Vec<f64> = data.shares.iter().map(|d| d.value).collect();
    let total: f64 = values.iter().sum();
    let percents = rounded_percentages(&values);

    // Angles are counter-clockwise from twelve o'clock with y pointing down.
    let at = |theta: f64, r: f64| Point::new(center.x + r * theta.cos(), center.y - r * theta.sin());
    let mut start = std::f64::consts::FRAC_PI_2;
    for (i, d) in data.shares.iter().enumerate() {
        let sweep = d.value / total * std::f64::consts::TAU;
        if sweep <= 0.0 {
            continue;
        }
        let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for k in 0..=steps {
            points.push(at(start + sweep * k as f64 / steps as f64, radius));
        }
        let color = SLICE_PALETTE[i % SLICE_PALETTE.len()];
        canvas.fill_polygon(&points, color);
        let bbox = points
            .iter()
            .fold(Rect::from_points(center, center), |r, p| r.union_pt(*p));
        cx.mark(MarkKind::Slice, bbox);

        let mid = start + sweep / 2.0;
        let pct = format!("{}%", percents[i]);
        let inner = at(mid, radius * 0.6);
        cx.draw_centered(canvas, inner.x, inner.y - body_h / 2.0, &pct, &body, Rgb8::WHITE)?;

        let outer = at(mid, radius + 12.0);
        let lw = cx.text_width(&d.label, &body)?;
        let lx = if mid.cos() < -1e-6 {
            outer.x - lw
        } else if mid.cos() > 1e-6 {
            outer.x
        } else {
            outer.x - lw / 2.0
        };
        let ly = if mid.sin() > 0.0 {
            outer.y - body_h
        } else {
            outer.y
        };
        cx.draw_text(canvas, lx, ly, &d.label, &body, ink::TEXT)?;

        start += sweep;
    }
    Ok(())
}

fn draw_ranking(
    cx: &mut RenderCx<'_>,
    canvas: &mut Canvas,
    data: &DashboardData,
    area: Rect,
) -> CovergenResult<()> {
    let body = cx.fonts.body.clone();
    let body_h = body.line_height();
    let ranking = data.sorted_ranking();
    let top_value = ranking.first().map(|d| d.value).unwrap_or(0.0);
    let ceiling = data.max.unwrap_or_else(|| nice_ceiling(top_value));

    let plot = Rect::new(
        area.x0 + 40.0,
        area.y0 + body_h + 20.0,
        area.x1 - 40.0,
        area.y1 - body_h * 2.0 - 30.0,
    );
    if plot.width() <= 0.0 || plot.height() <= 0.0 {
        return Err(CovergenError::validation(
            "canvas is too small for a dashboard ranking",
        ));
    }

    let slot = plot.width() / ranking.len() as f64;
    let bar_w = slot * 0.6;
    for (i, d) in ranking.iter().enumerate() {
        let cx_slot = plot.x0 + slot * (i as f64 + 0.5);
        let bar_h = plot.height() * d.value / ceiling;
        let bar = Rect::new(cx_slot - bar_w / 2.0, plot.y1 - bar_h, cx_slot + bar_w / 2.0, plot.y1);
        canvas.fill_rect(bar, SLICE_PALETTE[i % SLICE_PALETTE.len()], 0.0);
        cx.mark(MarkKind::Bar, bar);

        let value = format_value(d.value);
        cx.draw_centered(canvas, cx_slot, bar.y0 - body_h - 4.0, &value, &body, ink::TEXT)?;

        let block = wrap_text(&mut cx.engine, &d.label, &body, slot - 4.0)?;
        let mut ly = plot.y1 + 8.0;
        for line in block.lines().iter().take(2) {
            cx.draw_centered(canvas, cx_slot, ly, line, &body, ink::TEXT)?;
            ly += body_h;
        }
    }

    canvas.draw_line(
        Point::new(plot.x0, plot.y1),
        Point::new(plot.x1, plot.y1),
        2.0,
        ink::MUTED,
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/dashboard.rs"]
mod tests;
