use std::path::PathBuf;

use chrono::NaiveDate;
use kurbo::Rect;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compose::comparison::ComparisonData;
use crate::compose::dashboard::DashboardData;
use crate::compose::flow::FlowData;
use crate::compose::grid::GridData;
use crate::compose::{comparison, cover, dashboard, flow, grid, output};
use crate::config::ComposerOpts;
use crate::foundation::core::{CanvasSize, Rgba8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::render::canvas::Canvas;
use crate::style::palette::{ContentType, StyleOverride, StyleProfile};
use crate::text::engine::{MeasureText, TextLayoutEngine};
use crate::text::font::{FontHandle, FontSet};

/// Layout algorithm without its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    /// Gradient cover with title.
    Cover,
    /// Grouped comparison bars.
    Comparison,
    /// Pie plus ranked bars.
    Dashboard,
    /// Stacked numbered steps.
    Flow,
    /// 3x2 feature cards.
    Grid,
}

impl RecipeKind {
    /// Tag used in file names and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Comparison => "comparison",
            Self::Dashboard => "dashboard",
            Self::Flow => "flow",
            Self::Grid => "grid",
        }
    }
}

impl std::str::FromStr for RecipeKind {
    type Err = CovergenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "comparison" => Ok(Self::Comparison),
            "dashboard" => Ok(Self::Dashboard),
            "flow" => Ok(Self::Flow),
            "grid" => Ok(Self::Grid),
            other => Err(CovergenError::validation(format!(
                "unknown recipe \"{other}\" (expected cover, comparison, dashboard, flow or grid)"
            ))),
        }
    }
}

impl ContentType {
    /// Default illustration recipe for articles of this type.
    pub fn illustration(self) -> RecipeKind {
        match self {
            Self::Comparison => RecipeKind::Comparison,
            Self::Tutorial => RecipeKind::Flow,
            Self::WeeklySummary => RecipeKind::Dashboard,
            Self::NewTool | Self::CaseStudy | Self::QaInteractive | Self::ResourceList => {
                RecipeKind::Grid
            }
        }
    }
}

/// Layout algorithm plus the data it draws.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipe {
    /// Gradient cover; uses the job title, label and date.
    #[default]
    Cover,
    /// Grouped comparison bars.
    Comparison(ComparisonData),
    /// Pie plus ranked bars.
    Dashboard(DashboardData),
    /// Stacked numbered steps.
    Flow(FlowData),
    /// 3x2 feature cards.
    Grid(GridData),
}

impl Recipe {
    /// Kind without data.
    pub fn kind(&self) -> RecipeKind {
        match self {
            Self::Cover => RecipeKind::Cover,
            Self::Comparison(_) => RecipeKind::Comparison,
            Self::Dashboard(_) => RecipeKind::Dashboard,
            Self::Flow(_) => RecipeKind::Flow,
            Self::Grid(_) => RecipeKind::Grid,
        }
    }

    /// Check the dataset without drawing anything.
    pub fn validate(&self) -> CovergenResult<()> {
        match self {
            Self::Cover => Ok(()),
            Self::Comparison(d) => d.validate().map(|_| ()),
            Self::Dashboard(d) => d.validate(),
            Self::Flow(d) => d.validate(),
            Self::Grid(d) => d.validate(),
        }
    }
}

/// Where the PNG goes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// Exactly this path.
    File(PathBuf),
    /// A generated, collision-resistant name inside this directory.
    Dir(PathBuf),
}

/// One request for one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderJob {
    /// Article category; selects the style.
    pub content_type: ContentType,
    /// Cover title, or chart heading for illustrations.
    #[serde(default)]
    pub title: String,
    /// Short badge text on covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Layout and data.
    #[serde(default)]
    pub recipe: Recipe,
    /// Replaces the table style for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_override: Option<StyleOverride>,
    /// Replaces the configured canvas size for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<CanvasSize>,
    /// Seed for decorative placement.
    #[serde(default)]
    pub seed: u64,
    /// Date stamp; today (local time) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Output destination.
    pub output: OutputTarget,
}

impl RenderJob {
    /// Cover job with defaults for everything but the essentials.
    pub fn cover(content_type: ContentType, title: impl Into<String>, output: OutputTarget) -> Self {
        Self {
            content_type,
            title: title.into(),
            label: None,
            recipe: Recipe::Cover,
            style_override: None,
            size: None,
            seed: 0,
            date: None,
            output,
        }
    }

    /// Illustration job drawing `recipe`.
    pub fn illustration(
        content_type: ContentType,
        title: impl Into<String>,
        recipe: Recipe,
        output: OutputTarget,
    ) -> Self {
        Self {
            recipe,
            ..Self::cover(content_type, title, output)
        }
    }

    /// Style in effect for this job.
    pub fn style(&self) -> &StyleProfile {
        match &self.style_override {
            Some(o) => o.profile(),
            None => self.content_type.style(),
        }
    }
}

/// Kind of element a recipe placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    /// One wrapped title or heading line.
    TitleLine,
    /// Decorative circle.
    Decoration,
    /// Cover label badge.
    Badge,
    /// Date stamp.
    Date,
    /// Bar in a bar chart.
    Bar,
    /// Pie slice.
    Slice,
    /// Chart legend.
    Legend,
    /// Flow step box.
    StepBox,
    /// Numbered flow badge.
    StepBadge,
    /// Connector between flow steps.
    Arrow,
    /// Feature card.
    Card,
}

/// Geometry of one placed element, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark {
    /// What was placed.
    pub kind: MarkKind,
    /// Bounding box.
    pub rect: Rect,
}

/// Finished raster plus the geometry of everything data-bearing on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    /// Pixels.
    pub canvas: Canvas,
    /// Placed elements in drawing order.
    pub marks: Vec<Mark>,
}

impl Rendered {
    /// Marks of one kind, in drawing order.
    pub fn marks_of(&self, kind: MarkKind) -> impl Iterator<Item = &Mark> + '_ {
        self.marks.iter().filter(move |m| m.kind == kind)
    }
}

/// Per-render state shared by the recipes: text engine, fonts, style and collected marks.
pub(crate) struct RenderCx<'a> {
    pub(crate) engine: TextLayoutEngine,
    pub(crate) fonts: &'a FontSet,
    pub(crate) opts: &'a ComposerOpts,
    pub(crate) style: &'a StyleProfile,
    marks: Vec<Mark>,
}

impl<'a> RenderCx<'a> {
    pub(crate) fn new(fonts: &'a FontSet, opts: &'a ComposerOpts, style: &'a StyleProfile) -> Self {
        Self {
            engine: TextLayoutEngine::new(),
            fonts,
            opts,
            style,
            marks: Vec::new(),
        }
    }

    pub(crate) fn mark(&mut self, kind: MarkKind, rect: Rect) {
        self.marks.push(Mark { kind, rect });
    }

    pub(crate) fn text_width(&mut self, text: &str, font: &FontHandle) -> CovergenResult<f64> {
        self.engine.text_width(text, font)
    }

    pub(crate) fn draw_text(
        &mut self,
        canvas: &mut Canvas,
        x: f64,
        y: f64,
        text: &str,
        font: &FontHandle,
        color: impl Into<Rgba8>,
    ) -> CovergenResult<()> {
        self.engine.draw_text(canvas, x, y, text, font, color.into())
    }

    /// Draw `text` centered on `center_x`; returns its width.
    pub(crate) fn draw_centered(
        &mut self,
        canvas: &mut Canvas,
        center_x: f64,
        y: f64,
        text: &str,
        font: &FontHandle,
        color: impl Into<Rgba8>,
    ) -> CovergenResult<f64> {
        let w = self.engine.text_width(text, font)?;
        self.engine
            .draw_text(canvas, center_x - w / 2.0, y, text, font, color.into())?;
        Ok(w)
    }

    pub(crate) fn finish(self, canvas: Canvas) -> Rendered {
        Rendered {
            canvas,
            marks: self.marks,
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Threading controls for [`Composer::render_batch`].
pub struct BatchThreading {
    /// Render jobs on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Renders [`RenderJob`]s with one resolved font set and configuration.
#[derive(Clone, Debug)]
pub struct Composer {
    opts: ComposerOpts,
    fonts: FontSet,
}

impl Composer {
    /// Validate `opts` and resolve fonts from its candidate list.
    pub fn new(opts: ComposerOpts) -> CovergenResult<Self> {
        opts.validate()?;
        let fonts = FontSet::resolve(
            &opts.font_candidates,
            opts.title_px,
            opts.body_px,
            opts.allow_builtin_fallback,
        )?;
        Ok(Self { opts, fonts })
    }

    /// Use an already resolved font set.
    pub fn with_fonts(opts: ComposerOpts, fonts: FontSet) -> CovergenResult<Self> {
        opts.validate()?;
        Ok(Self { opts, fonts })
    }

    /// Active configuration.
    pub fn opts(&self) -> &ComposerOpts {
        &self.opts
    }

    /// Resolved fonts.
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Canvas size `job` renders at.
    pub fn size_for(&self, job: &RenderJob) -> CanvasSize {
        job.size.unwrap_or(match job.recipe.kind() {
            RecipeKind::Cover => self.opts.cover_size,
            RecipeKind::Dashboard => self.opts.dashboard_size,
            RecipeKind::Comparison | RecipeKind::Flow | RecipeKind::Grid => self.opts.content_size,
        })
    }

    /// Rasterize `job` without touching the filesystem.
    #[tracing::instrument(
        skip(self, job),
        fields(recipe = job.recipe.kind().as_str(), content_type = %job.content_type)
    )]
    pub fn render_canvas(&self, job: &RenderJob) -> CovergenResult<Rendered> {
        let size = self.size_for(job);
        size.validate()?;
        job.recipe.validate()?;

        let mut cx = RenderCx::new(&self.fonts, &self.opts, job.style());
        let canvas = match &job.recipe {
            Recipe::Cover => {
                let date = job
                    .date
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                cover::compose(&mut cx, size, &job.title, job.label.as_deref(), date, job.seed)?
            }
            Recipe::Comparison(data) => comparison::compose(&mut cx, size, data, &job.title)?,
            Recipe::Dashboard(data) => dashboard::compose(&mut cx, size, data)?,
            Recipe::Flow(data) => flow::compose(&mut cx, size, data)?,
            Recipe::Grid(data) => grid::compose(&mut cx, size, data, &job.title)?,
        };
        Ok(cx.finish(canvas))
    }

    /// Rasterize `job` and write it as PNG; returns the written path.
    #[tracing::instrument(skip(self, job), fields(recipe = job.recipe.kind().as_str()))]
    pub fn render(&self, job: &RenderJob) -> CovergenResult<PathBuf> {
        let rendered = self.render_canvas(job)?;
        let path = output::resolve_path(&job.output, job.recipe.kind(), job.content_type);
        output::write_png(&rendered.canvas, &path)?;
        Ok(path)
    }

    /// Rasterize many jobs; results keep input order and match sequential output byte for byte.
    pub fn render_batch_canvases(
        &self,
        jobs: &[RenderJob],
        threading: &BatchThreading,
    ) -> CovergenResult<Vec<CovergenResult<Rendered>>> {
        if !threading.parallel {
            return Ok(jobs.iter().map(|job| self.render_canvas(job)).collect());
        }
        let pool = build_thread_pool(threading.threads)?;
        Ok(pool.install(|| jobs.par_iter().map(|job| self.render_canvas(job)).collect()))
    }

    /// Render and write many jobs; per-job failures do not stop the others.
    pub fn render_batch(
        &self,
        jobs: &[RenderJob],
        threading: &BatchThreading,
    ) -> CovergenResult<Vec<CovergenResult<PathBuf>>> {
        if !threading.parallel {
            return Ok(jobs.iter().map(|job| self.render(job)).collect());
        }
        let pool = build_thread_pool(threading.threads)?;
        Ok(pool.install(|| jobs.par_iter().map(|job| self.render(job)).collect()))
    }
}

fn build_thread_pool(threads: Option<usize>) -> CovergenResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CovergenError::configuration(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/job.rs"]
mod tests;
