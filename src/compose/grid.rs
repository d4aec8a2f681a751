use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::compose::job::{MarkKind, RenderCx};
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::render::canvas::Canvas;
use crate::style::palette::ink;

/// Columns in the card grid.
pub const COLS: usize = 3;
/// Rows in the card grid.
pub const ROWS: usize = 2;
/// Cards per grid.
pub const CARDS: usize = COLS * ROWS;

/// Feature items, each `"<icon> <label>"`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridData {
    /// Items in reading order; at most six are drawn.
    #[serde(default)]
    pub items: Vec<String>,
}

impl GridData {
    /// Blank item strings are malformed; an empty list is not.
    pub fn validate(&self) -> CovergenResult<()> {
        if let Some(i) = self.items.iter().position(|s| s.trim().is_empty()) {
            return Err(CovergenError::invalid_dataset(format!(
                "grid item {i} is blank"
            )));
        }
        Ok(())
    }
}

/// Split an item into its icon line and label line (at most two lines).
pub fn item_lines(item: &str) -> Vec<String> {
    let mut words = item.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };
    let rest = words.collect::<Vec<_>>().join(" ");
    if rest.is_empty() {
        vec![first.to_owned()]
    } else {
        vec![first.to_owned(), rest]
    }
}

/// Card rectangles for a canvas of `size`, row-major.
pub fn card_rects(size: CanvasSize) -> [Rect; CARDS] {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let cell_w = ((w - 40.0) / COLS as f64).min(200.0);
    let start_y = 120.0_f64.min(h / 5.0);
    let cell_h = ((h - start_y - 20.0) / ROWS as f64).min(150.0);
    let start_x = (w - cell_w * COLS as f64) / 2.0;
    std::array::from_fn(|i| {
        let (row, col) = (i / COLS, i % COLS);
        let x = start_x + col as f64 * cell_w;
        let y = start_y + row as f64 * cell_h;
        Rect::new(x, y, x + cell_w, y + cell_h).inset(-10.0)
    })
}

pub(crate) fn compose(
    cx: &mut RenderCx<'_>,
    size: CanvasSize,
    data: &GridData,
    heading: &str,
) -> CovergenResult<Canvas> {
    data.validate()?;
    if data.items.len() > CARDS {
        tracing::debug!(
            items = data.items.len(),
            dropped = data.items.len() - CARDS,
            "feature grid truncated to six cards"
        );
    }

    let mut canvas = Canvas::with_size(size, ink::PAPER)?;
    let w = f64::from(size.width);
    let title = cx.fonts.title.clone();
    let body = cx.fonts.body.clone();

    let heading = heading.trim();
    if !heading.is_empty() {
        let hw = cx.draw_centered(&mut canvas, w / 2.0, 30.0, heading, &title, Rgb8::BLACK)?;
        cx.mark(
            MarkKind::TitleLine,
            Rect::new((w - hw) / 2.0, 30.0, (w + hw) / 2.0, 30.0 + title.line_height()),
        );
    }

    for (i, card) in card_rects(size).into_iter().enumerate() {
        canvas.stroke_rounded_rect(card, 15.0, 1.0, ink::GRID, Rgb8::WHITE);
        cx.mark(MarkKind::Card, card);

        let Some(item) = data.items.get(i) else {
            continue;
        };
        let lines = item_lines(item);
        let line_h = body.line_height() + 6.0;
        let mut y = card.y0 + (card.height() - line_h * lines.len() as f64) / 2.0;
        for line in &lines {
            cx.draw_centered(&mut canvas, card.center().x, y, line, &body, Rgb8::BLACK)?;
            y += line_h;
        }
    }

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/grid.rs"]
mod tests;
