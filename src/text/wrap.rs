use crate::foundation::error::CovergenResult;
use crate::text::engine::MeasureText;
use crate::text::font::FontHandle;

/// Word-wrapped lines bound to one font and a maximum pixel width.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    lines: Vec<String>,
    widths: Vec<f64>,
    font: FontHandle,
    bound_width: f64,
}

impl TextBlock {
    /// Wrapped lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Measured width of each line.
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Font the block was measured with.
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Width the block was wrapped against.
    pub fn bound_width(&self) -> f64 {
        self.bound_width
    }

    /// `true` when no line was produced.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total height at the font's line height.
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.font.line_height()
    }

    /// Widest line.
    pub fn max_width(&self) -> f64 {
        self.widths.iter().copied().fold(0.0, f64::max)
    }
}

/// Greedy word-wrap of `text` into lines no wider than `bound_width`.
///
/// Words are split on whitespace and never broken; a word wider than the bound sits alone on its
/// line. Whitespace-only input produces an empty block.
pub fn wrap_text<M: MeasureText + ?Sized>(
    measure: &mut M,
    text: &str,
    font: &FontHandle,
    bound_width: f64,
) -> CovergenResult<TextBlock> {
    let mut lines = Vec::new();
    let mut widths = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0;

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };
        let w = measure.text_width(&candidate, font)?;
        if w <= bound_width || current.is_empty() {
            current = candidate;
            current_w = w;
            continue;
        }
        lines.push(std::mem::take(&mut current));
        widths.push(current_w);
        current_w = measure.text_width(word, font)?;
        current = word.to_owned();
    }
    if !current.is_empty() {
        lines.push(current);
        widths.push(current_w);
    }

    Ok(TextBlock {
        lines,
        widths,
        font: font.clone(),
        bound_width,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
