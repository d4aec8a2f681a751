use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kurbo::Rect;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::render::canvas::Canvas;
use crate::render::shapes::{affine_to_cpu, raster_patch};
use crate::text::builtin;
use crate::text::font::{FontHandle, GlyphSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Single-line text measurement, the only query word-wrap needs.
pub trait MeasureText {
    /// Advance width in pixels of `text` set on one line in `font`.
    fn text_width(&mut self, text: &str, font: &FontHandle) -> CovergenResult<f64>;
}

/// Stateful helper for shaping text with Parley and drawing it onto a [`Canvas`].
///
/// Built-in bitmap handles bypass Parley entirely. One engine serves one render; it is not shared
/// across threads.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<PathBuf, String>,
    cpu_fonts: HashMap<PathBuf, vello_cpu::peniko::FontData>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
            cpu_fonts: HashMap::new(),
        }
    }

    fn family_for(&mut self, path: &Path, bytes: &[u8]) -> CovergenResult<String> {
        if let Some(name) = self.families.get(path) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CovergenError::configuration(format!(
                "no font families registered from '{}'",
                path.display()
            ))
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CovergenError::configuration("registered font family has no name"))?
            .to_string();

        self.families.insert(path.to_path_buf(), family_name.clone());
        Ok(family_name)
    }

    fn layout_outline(
        &mut self,
        text: &str,
        path: &Path,
        bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CovergenResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CovergenError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_for(path, bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    fn cpu_font(&mut self, path: &Path, bytes: &[u8]) -> vello_cpu::peniko::FontData {
        self.cpu_fonts
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), 0)
            })
            .clone()
    }

    /// Draw one line of `text` with its top-left corner at `(x, y)`.
    pub fn draw_text(
        &mut self,
        canvas: &mut Canvas,
        x: f64,
        y: f64,
        text: &str,
        font: &FontHandle,
        color: Rgba8,
    ) -> CovergenResult<()> {
        if text.is_empty() || color.a == 0 {
            return Ok(());
        }
        let (path, bytes) = match font.source() {
            GlyphSource::Builtin => {
                builtin::draw(canvas, x, y, text, font.size_px(), color);
                return Ok(());
            }
            GlyphSource::Outline { path, bytes } => (path, bytes),
        };

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.layout_outline(text, path, bytes, font.size_px(), brush)?;
        let cpu_font = self.cpu_font(path, bytes);

        let pad = f64::from(font.size_px()) * 0.25;
        let bounds = Rect::new(
            x - pad,
            y - pad,
            x + f64::from(layout.full_width()) + pad,
            y + f64::from(layout.height()) + pad,
        );
        raster_patch(canvas, bounds, |ctx, to_patch| {
            ctx.set_transform(affine_to_cpu(to_patch * kurbo::Affine::translate((x, y))));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&cpu_font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        });
        Ok(())
    }
}

impl MeasureText for TextLayoutEngine {
    fn text_width(&mut self, text: &str, font: &FontHandle) -> CovergenResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        match font.source() {
            GlyphSource::Builtin => Ok(f64::from(builtin::text_width(text, font.size_px()))),
            GlyphSource::Outline { path, bytes } => {
                let layout = self.layout_outline(
                    text,
                    path,
                    bytes,
                    font.size_px(),
                    TextBrushRgba8::default(),
                )?;
                Ok(f64::from(layout.full_width()))
            }
        }
    }
}

impl Canvas {
    /// Draw one line of `text` with its top-left corner at `(x, y)` through `engine`.
    pub fn draw_text(
        &mut self,
        engine: &mut TextLayoutEngine,
        x: f64,
        y: f64,
        text: &str,
        font: &FontHandle,
        color: impl Into<Rgba8>,
    ) -> CovergenResult<()> {
        engine.draw_text(self, x, y, text, font, color.into())
    }
}

/// Draw `text` on `canvas` horizontally centered on `center_x`, top edge at `y`.
pub fn draw_centered(
    engine: &mut TextLayoutEngine,
    canvas: &mut Canvas,
    center_x: f64,
    y: f64,
    text: &str,
    font: &FontHandle,
    color: Rgba8,
) -> CovergenResult<f64> {
    let w = engine.text_width(text, font)?;
    engine.draw_text(canvas, center_x - w / 2.0, y, text, font, color)?;
    Ok(w)
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
