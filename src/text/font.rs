use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{CovergenError, CovergenResult};
use crate::text::builtin;

/// Where glyph outlines (or bitmaps) come from.
#[derive(Clone, PartialEq, Eq)]
pub enum GlyphSource {
    /// Outline font file loaded from disk.
    Outline {
        /// Path the bytes were read from.
        path: PathBuf,
        /// Raw sfnt/ttc bytes.
        bytes: Arc<Vec<u8>>,
    },
    /// Built-in 5x7 bitmap glyph set.
    Builtin,
}

impl std::fmt::Debug for GlyphSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { path, bytes } => f
                .debug_struct("Outline")
                .field("path", path)
                .field("len", &bytes.len())
                .finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

/// A glyph source at one pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct FontHandle {
    source: Arc<GlyphSource>,
    size_px: f32,
}

impl FontHandle {
    /// Wrap a shared source at `size_px`.
    pub fn new(source: Arc<GlyphSource>, size_px: f32) -> Self {
        Self { source, size_px }
    }

    /// Built-in bitmap font at `size_px`.
    pub fn builtin(size_px: f32) -> Self {
        Self::new(Arc::new(GlyphSource::Builtin), size_px)
    }

    /// Same source at another size.
    pub fn with_size(&self, size_px: f32) -> Self {
        Self::new(Arc::clone(&self.source), size_px)
    }

    /// Glyph source.
    pub fn source(&self) -> &GlyphSource {
        &self.source
    }

    /// Requested pixel size.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// `true` for the built-in bitmap set.
    pub fn is_builtin(&self) -> bool {
        matches!(*self.source, GlyphSource::Builtin)
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f64 {
        match *self.source {
            GlyphSource::Builtin => f64::from(builtin::line_height(self.size_px)),
            GlyphSource::Outline { .. } => f64::from(self.size_px) * 1.25,
        }
    }
}

/// Title and body handles; compositions never use other sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSet {
    /// Large font for headings.
    pub title: FontHandle,
    /// Small font for labels and body text.
    pub body: FontHandle,
}

impl FontSet {
    /// Both sizes from one source.
    pub fn from_source(source: Arc<GlyphSource>, title_px: f32, body_px: f32) -> Self {
        Self {
            title: FontHandle::new(Arc::clone(&source), title_px),
            body: FontHandle::new(source, body_px),
        }
    }

    /// Both sizes on the built-in bitmap font.
    pub fn builtin(title_px: f32, body_px: f32) -> Self {
        Self::from_source(Arc::new(GlyphSource::Builtin), title_px, body_px)
    }

    /// Resolve a font set from an ordered candidate list.
    ///
    /// The first readable candidate with sfnt/ttc magic that also parses as a font wins. With no
    /// usable candidate the built-in set is used, or a [`CovergenError::Configuration`] is returned
    /// when fallback is disallowed.
    pub fn resolve(
        candidates: &[PathBuf],
        title_px: f32,
        body_px: f32,
        allow_builtin_fallback: bool,
    ) -> CovergenResult<Self> {
        if !(title_px > 0.0 && body_px > 0.0) {
            return Err(CovergenError::validation(
                "font sizes must be finite and > 0",
            ));
        }

        let found = if candidates == default_candidates().as_slice() {
            default_source().clone()
        } else {
            probe_candidates(candidates)
        };

        match found {
            Some(source) => Ok(Self::from_source(source, title_px, body_px)),
            None if allow_builtin_fallback => {
                tracing::warn!(
                    candidates = candidates.len(),
                    "no usable outline font; falling back to built-in bitmap glyphs"
                );
                Ok(Self::builtin(title_px, body_px))
            }
            None => Err(CovergenError::configuration(format!(
                "no usable font among {} candidate(s) and built-in fallback is disabled",
                candidates.len()
            ))),
        }
    }
}

/// Platform font search path, in probe order.
pub fn default_candidates() -> Vec<PathBuf> {
    [
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/Helvetica.ttc",
        "C:/Windows/Fonts/msyh.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

fn default_source() -> &'static Option<Arc<GlyphSource>> {
    static DEFAULT: OnceLock<Option<Arc<GlyphSource>>> = OnceLock::new();
    DEFAULT.get_or_init(|| probe_candidates(&default_candidates()))
}

fn probe_candidates(candidates: &[PathBuf]) -> Option<Arc<GlyphSource>> {
    candidates.iter().find_map(|path| {
        probe(path).map(|bytes| {
            tracing::debug!(path = %path.display(), "resolved outline font");
            Arc::new(GlyphSource::Outline {
                path: path.clone(),
                bytes,
            })
        })
    })
}

/// Read `path` and return its bytes when they hold at least one parseable font face.
pub fn probe(path: &Path) -> Option<Arc<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) if !looks_like_font(&bytes) => {
            tracing::debug!(path = %path.display(), "font candidate has no sfnt/ttc magic");
            None
        }
        Ok(bytes) if !registers_families(&bytes) => {
            tracing::debug!(path = %path.display(), "font candidate failed to parse");
            None
        }
        Ok(bytes) => Some(Arc::new(bytes)),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "font candidate unreadable");
            None
        }
    }
}

/// `true` when `bytes` start with a TrueType, OpenType or collection signature.
pub fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"ttcf") | Some(b"true")
    )
}

/// `true` when a scratch collection finds at least one font family in `bytes`.
///
/// Layout registers the same bytes again, so an accepted file always yields a family there.
pub fn registers_families(bytes: &[u8]) -> bool {
    let mut scratch = parley::fontique::Collection::new(parley::fontique::CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    !scratch
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None)
        .is_empty()
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
