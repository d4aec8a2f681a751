use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::compose::job::{MarkKind, RenderCx};
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::render::canvas::Canvas;
use crate::style::palette::ink;

const TOP: f64 = 50.0;
const GAP: f64 = 20.0;
const MAX_BOX_H: f64 = 100.0;
const MIN_BOX_H: f64 = 24.0;
const BOX_X: f64 = 100.0;
const BADGE_R: f64 = 20.0;

/// Ordered steps of a procedure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowData {
    /// Step labels, first step on top.
    pub steps: Vec<String>,
}

impl FlowData {
    /// Reject empty step lists and blank labels.
    pub fn validate(&self) -> CovergenResult<()> {
        if self.steps.is_empty() {
            return Err(CovergenError::invalid_dataset("flow needs at least one step"));
        }
        if let Some(i) = self.steps.iter().position(|s| s.trim().is_empty()) {
            return Err(CovergenError::invalid_dataset(format!(
                "flow step {} is blank",
                i + 1
            )));
        }
        Ok(())
    }
}

/// Box height for `n` steps on a canvas `height` pixels tall, if they fit.
pub fn box_height(n: usize, height: u32) -> Option<f64> {
    if n == 0 {
        return None;
    }
    let pitch = ((f64::from(height) - 2.0 * TOP) / n as f64).min(MAX_BOX_H + GAP);
    let box_h = pitch - GAP;
    (box_h >= MIN_BOX_H).then_some(box_h)
}

pub(crate) fn compose(
    cx: &mut RenderCx<'_>,
    size: CanvasSize,
    data: &FlowData,
) -> CovergenResult<Canvas> {
    data.validate()?;
    let w = f64::from(size.width);
    if w < 2.0 * BOX_X + 100.0 {
        return Err(CovergenError::validation(format!(
            "canvas width {} is too narrow for a flow diagram",
            size.width
        )));
    }
    let box_h = box_height(data.steps.len(), size.height).ok_or_else(|| {
        CovergenError::invalid_dataset(format!(
            "{} steps do not fit a {}px tall canvas",
            data.steps.len(),
            size.height
        ))
    })?;

    let mut canvas = Canvas::with_size(size, Rgb8::WHITE)?;
    let body = cx.fonts.body.clone();
    let title = cx.fonts.title.clone();
    let text_x = BOX_X + 20.0;
    let text_room = w - BOX_X - text_x - 20.0;

    for (i, step) in data.steps.iter().enumerate() {
        let y = TOP + i as f64 * (box_h + GAP);
        let step_box = Rect::new(BOX_X, y, w - BOX_X, y + box_h);
        canvas.stroke_rounded_rect(step_box, 10.0, 2.0, ink::STEP_LINE, ink::STEP_FILL);
        cx.mark(MarkKind::StepBox, step_box);

        let mid_y = y + box_h / 2.0;
        let badge_c = Point::new(BOX_X - 30.0, mid_y);
        canvas.fill_ellipse(badge_c, BADGE_R, BADGE_R, ink::STEP_LINE);
        let number = (i + 1).to_string();
        cx.draw_centered(
            &mut canvas,
            badge_c.x,
            mid_y - body.line_height() / 2.0,
            &number,
            &body,
            Rgb8::WHITE,
        )?;
        cx.mark(
            MarkKind::StepBadge,
            Rect::from_center_size(badge_c, (BADGE_R * 2.0, BADGE_R * 2.0)),
        );

        let step = step.trim();
        let font = if title.line_height() <= box_h - 8.0
            && cx.text_width(step, &title)? <= text_room
        {
            &title
        } else {
            &body
        };
        cx.draw_text(
            &mut canvas,
            text_x,
            mid_y - font.line_height() / 2.0,
            step,
            font,
            Rgb8::BLACK,
        )?;

        if i + 1 < data.steps.len() {
            let ax = w / 2.0;
            let ay = y + box_h + GAP / 2.0;
            let arrow = [
                Point::new(ax, ay),
                Point::new(ax - 10.0, ay - 10.0),
                Point::new(ax + 10.0, ay - 10.0),
            ];
            canvas.fill_polygon(&arrow, ink::MUTED);
            cx.mark(MarkKind::Arrow, Rect::new(ax - 10.0, ay - 10.0, ax + 10.0, ay));
        }
    }

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/flow.rs"]
mod tests;
