//! covergen procedurally composes article cover images and illustrations.
//!
//! Every image is built from a fixed recipe on a CPU raster canvas: vertical gradients, translucent
//! decorations, word-wrapped text and antialiased shapes, written out as PNG.
//!
//! - Describe the image as a [`RenderJob`] (content type, title, [`Recipe`], output target)
//! - Create a [`Composer`] from [`ComposerOpts`] (fonts are resolved once)
//! - Call [`Composer::render`], or [`Composer::render_canvas`] to keep the pixels in memory
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compose;
/// Composer configuration.
pub mod config;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod text;

pub use crate::foundation::core::{CanvasSize, MAX_CANVAS_EDGE, Point, Rect, Rgb8, Rgba8, Vec2, parse_hex};
pub use crate::foundation::error::{CovergenError, CovergenResult};

pub use crate::compose::comparison::{ComparisonData, DEFAULT_CEILING, MAX_SERIES, Series};
pub use crate::compose::cover::{Decoration, clean_title, place_decorations};
pub use crate::compose::dashboard::{DashboardData, Datum, nice_ceiling, rounded_percentages};
pub use crate::compose::flow::{FlowData, box_height};
pub use crate::compose::grid::{CARDS, GridData, card_rects, item_lines};
pub use crate::compose::job::{
    BatchThreading, Composer, Mark, MarkKind, Recipe, RecipeKind, RenderJob, Rendered,
    OutputTarget,
};
pub use crate::compose::output::{generated_file_name, resolve_path, write_png};
pub use crate::compose::samples;
pub use crate::config::{ComposerOpts, DecorOpts};
pub use crate::render::canvas::Canvas;
pub use crate::render::gradient::{fill_vertical_gradient, gradient_row_color};
pub use crate::style::palette::{
    ContentType, SERIES_PALETTE, SLICE_PALETTE, StyleOverride, StylePreset, StyleProfile,
};
pub use crate::text::engine::{MeasureText, TextLayoutEngine, draw_centered};
pub use crate::text::font::{FontHandle, FontSet, GlyphSource, default_candidates, looks_like_font};
pub use crate::text::wrap::{TextBlock, wrap_text};
