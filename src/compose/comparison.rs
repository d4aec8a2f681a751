use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::compose::job::{MarkKind, RenderCx};
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::render::canvas::Canvas;
use crate::style::palette::{SERIES_PALETTE, ink};

/// Ceiling used when the dataset does not declare one.
pub const DEFAULT_CEILING: f64 = 10.0;
/// Most series one chart can carry.
pub const MAX_SERIES: usize = SERIES_PALETTE.len();

const GRID_STEPS: u32 = 5;

/// Named values, one per category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend name.
    pub name: String,
    /// Value per category, in category order.
    pub values: Vec<f64>,
}

/// Grouped bar comparison of several series over shared categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonData {
    /// Category axis labels.
    pub categories: Vec<String>,
    /// Compared series.
    pub series: Vec<Series>,
    /// Value axis ceiling; [`DEFAULT_CEILING`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ComparisonData {
    /// Check shape and ranges; returns the value ceiling.
    pub fn validate(&self) -> CovergenResult<f64> {
        if self.categories.is_empty() {
            return Err(CovergenError::invalid_dataset(
                "comparison needs at least one category",
            ));
        }
        if self.series.is_empty() {
            return Err(CovergenError::invalid_dataset(
                "comparison needs at least one series",
            ));
        }
        if self.series.len() > MAX_SERIES {
            return Err(CovergenError::invalid_dataset(format!(
                "comparison supports at most {MAX_SERIES} series, got {}",
                self.series.len()
            )));
        }
        if let Some(i) = self.categories.iter().position(|c| c.trim().is_empty()) {
            return Err(CovergenError::invalid_dataset(format!(
                "category {i} has a blank label"
            )));
        }

        let ceiling = self.max.unwrap_or(DEFAULT_CEILING);
        if !(ceiling.is_finite() && ceiling > 0.0) {
            return Err(CovergenError::invalid_dataset(
                "comparison max must be finite and > 0",
            ));
        }

        for s in &self.series {
            if s.name.trim().is_empty() {
                return Err(CovergenError::invalid_dataset("series name must not be blank"));
            }
            if s.values.len() != self.categories.len() {
                return Err(CovergenError::invalid_dataset(format!(
                    "series \"{}\" has {} values for {} categories",
                    s.name,
                    s.values.len(),
                    self.categories.len()
                )));
            }
            if let Some(v) = s
                .values
                .iter()
                .find(|v| !(v.is_finite() && **v >= 0.0 && **v <= ceiling))
            {
                return Err(CovergenError::invalid_dataset(format!(
                    "series \"{}\" value {v} is outside [0, {ceiling}]",
                    s.name
                )));
            }
        }
        Ok(ceiling)
    }
}

/// Format an axis or value label without a trailing `.0`.
pub(crate) fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

pub(crate) fn compose(
    cx: &mut RenderCx<'_>,
    size: CanvasSize,
    data: &ComparisonData,
    heading: &str,
) -> CovergenResult<Canvas> {
    let ceiling = data.validate()?;
    let mut canvas = Canvas::with_size(size, Rgb8::WHITE)?;
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let title_font = cx.fonts.title.clone();
    let body = cx.fonts.body.clone();
    let body_h = body.line_height();

    let mut top = 20.0;
    let heading = heading.trim();
    if !heading.is_empty() {
        let hw = cx.draw_centered(&mut canvas, w / 2.0, top, heading, &title_font, ink::TEXT)?;
        cx.mark(
            MarkKind::TitleLine,
            Rect::new((w - hw) / 2.0, top, (w + hw) / 2.0, top + title_font.line_height()),
        );
        top += title_font.line_height();
    }

    let mut tick_w: f64 = 0.0;
    for i in 0..=GRID_STEPS {
        let label = format_value(ceiling * f64::from(i) / f64::from(GRID_STEPS));
        tick_w = tick_w.max(cx.text_width(&label, &body)?);
    }
    let plot = Rect::new(
        (tick_w + 20.0).max(60.0).min(w / 3.0),
        (top + body_h).min(h / 3.0),
        w - 40.0,
        h - body_h - 40.0,
    );
    if plot.width() <= 0.0 || plot.height() <= 0.0 {
        return Err(CovergenError::validation(format!(
            "canvas {}x{} is too small for a comparison chart",
            size.width, size.height
        )));
    }

    for i in 0..=GRID_STEPS {
        let v = ceiling * f64::from(i) / f64::from(GRID_STEPS);
        let y = plot.y1 - plot.height() * f64::from(i) / f64::from(GRID_STEPS);
        canvas.draw_line(Point::new(plot.x0, y), Point::new(plot.x1, y), 1.0, ink::GRID);
        let label = format_value(v);
        let lw = cx.text_width(&label, &body)?;
        cx.draw_text(&mut canvas, plot.x0 - lw - 8.0, y - body_h / 2.0, &label, &body, ink::MUTED)?;
    }

    let n = data.categories.len() as f64;
    let slot = plot.width() / n;
    let group_w = slot * 0.7;
    let bar_w = group_w / data.series.len() as f64;
    for (ci, category) in data.categories.iter().enumerate() {
        let slot_x = plot.x0 + slot * ci as f64;
        for (si, s) in data.series.iter().enumerate() {
            let x = slot_x + (slot - group_w) / 2.0 + bar_w * si as f64;
            let bar_h = plot.height() * s.values[ci] / ceiling;
            let bar = Rect::new(x, plot.y1 - bar_h, x + bar_w, plot.y1);
            canvas.fill_rect(bar, SERIES_PALETTE[si], 0.0);
            cx.mark(MarkKind::Bar, bar);
        }
        cx.draw_centered(&mut canvas, slot_x + slot / 2.0, plot.y1 + 10.0, category, &body, ink::TEXT)?;
    }

    canvas.draw_line(
        Point::new(plot.x0, plot.y1),
        Point::new(plot.x1, plot.y1),
        2.0,
        ink::MUTED,
    );
    canvas.draw_line(
        Point::new(plot.x0, plot.y0),
        Point::new(plot.x0, plot.y1),
        2.0,
        ink::MUTED,
    );

    if data.series.len() >= 2 {
        let swatch = (body_h * 0.6).round().max(8.0);
        let mut name_w: f64 = 0.0;
        for s in &data.series {
            name_w = name_w.max(cx.text_width(&s.name, &body)?);
        }
        let row_h = body_h + 4.0;
        let legend_w = swatch + 8.0 + name_w + 20.0;
        let legend = Rect::new(
            plot.x1 - legend_w - 10.0,
            plot.y0 + 10.0,
            plot.x1 - 10.0,
            plot.y0 + 10.0 + row_h * data.series.len() as f64 + 8.0,
        );
        canvas.stroke_rounded_rect(legend, 4.0, 1.0, ink::GRID, Rgb8::WHITE);
        for (si, s) in data.series.iter().enumerate() {
            let ry = legend.y0 + 4.0 + row_h * si as f64;
            let sy = ry + (row_h - swatch) / 2.0;
            canvas.fill_rect(
                Rect::new(legend.x0 + 10.0, sy, legend.x0 + 10.0 + swatch, sy + swatch),
                SERIES_PALETTE[si],
                0.0,
            );
            cx.draw_text(
                &mut canvas,
                legend.x0 + 18.0 + swatch,
                ry + 2.0,
                &s.name,
                &body,
                ink::TEXT,
            )?;
        }
        cx.mark(MarkKind::Legend, legend);
    }

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/comparison.rs"]
mod tests;
