use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::CanvasSize;
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::text::font::default_candidates;

/// Environment variable naming an extra font file, probed before the platform list.
pub const ENV_FONT: &str = "COVERGEN_FONT";
/// Environment variable overriding the decorative circle count.
pub const ENV_DECOR_COUNT: &str = "COVERGEN_DECOR_COUNT";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Composer-wide settings; every field has a default so partial JSON files are fine.
pub struct ComposerOpts {
    /// Cover canvas size.
    pub cover_size: CanvasSize,
    /// Comparison, flow and grid canvas size.
    pub content_size: CanvasSize,
    /// Dashboard canvas size.
    pub dashboard_size: CanvasSize,
    /// Horizontal margin around cover text.
    pub margin: u32,
    /// Title font size in pixels.
    pub title_px: f32,
    /// Body font size in pixels.
    pub body_px: f32,
    /// Ordered outline font search path.
    pub font_candidates: Vec<PathBuf>,
    /// Use the built-in bitmap glyphs when no candidate is usable.
    pub allow_builtin_fallback: bool,
    /// Decorative circle settings for covers.
    pub decor: DecorOpts,
}

impl Default for ComposerOpts {
    fn default() -> Self {
        Self {
            cover_size: CanvasSize {
                width: 900,
                height: 500,
            },
            content_size: CanvasSize {
                width: 800,
                height: 600,
            },
            dashboard_size: CanvasSize {
                width: 1200,
                height: 600,
            },
            margin: 50,
            title_px: 48.0,
            body_px: 24.0,
            font_candidates: default_candidates(),
            allow_builtin_fallback: true,
            decor: DecorOpts::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Translucent circle decoration drawn behind cover titles.
pub struct DecorOpts {
    /// Number of circles.
    pub count: u32,
    /// Smallest radius in pixels.
    pub radius_min: f64,
    /// Largest radius in pixels.
    pub radius_max: f64,
    /// Lowest white alpha.
    pub alpha_min: u8,
    /// Highest white alpha.
    pub alpha_max: u8,
    /// Upper bound on summed circle area as a fraction of the canvas.
    pub max_coverage: f64,
}

impl Default for DecorOpts {
    fn default() -> Self {
        Self {
            count: 5,
            radius_min: 20.0,
            radius_max: 80.0,
            alpha_min: 10,
            alpha_max: 30,
            max_coverage: 0.25,
        }
    }
}

impl ComposerOpts {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_path(path: &Path) -> CovergenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CovergenError::configuration(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Parse JSON text.
    pub fn from_json(text: &str) -> CovergenResult<Self> {
        let opts: Self = serde_json::from_str(text)
            .map_err(|e| CovergenError::configuration(format!("parse config: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Apply `COVERGEN_FONT` and `COVERGEN_DECOR_COUNT` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(font) = lookup(ENV_FONT)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
        {
            self.font_candidates.insert(0, PathBuf::from(font));
        }
        self.decor.count = lookup(ENV_DECOR_COUNT)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(self.decor.count);
        self
    }

    /// Reject settings no composition can honor.
    pub fn validate(&self) -> CovergenResult<()> {
        for (name, size) in [
            ("cover_size", self.cover_size),
            ("content_size", self.content_size),
            ("dashboard_size", self.dashboard_size),
        ] {
            size.validate()
                .map_err(|e| CovergenError::configuration(format!("{name}: {e}")))?;
        }
        if !(self.title_px.is_finite() && self.title_px > 0.0)
            || !(self.body_px.is_finite() && self.body_px > 0.0)
        {
            return Err(CovergenError::configuration(
                "title_px and body_px must be finite and > 0",
            ));
        }
        if u64::from(self.margin) * 2 >= u64::from(self.cover_size.width) {
            return Err(CovergenError::configuration(
                "margin leaves no room for the cover title",
            ));
        }
        let d = &self.decor;
        if !(d.radius_min >= 0.0 && d.radius_max >= d.radius_min) {
            return Err(CovergenError::configuration(
                "decor radius range must satisfy 0 <= radius_min <= radius_max",
            ));
        }
        if d.alpha_min > d.alpha_max {
            return Err(CovergenError::configuration(
                "decor alpha range must satisfy alpha_min <= alpha_max",
            ));
        }
        if !(0.0..=1.0).contains(&d.max_coverage) {
            return Err(CovergenError::configuration(
                "decor max_coverage must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
