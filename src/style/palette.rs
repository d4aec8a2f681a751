//! Content-type style table, named cover presets and chart palettes.
//!
//! | content type     | gradient start | gradient end   | accent    | mood                 |
//! |------------------|----------------|----------------|-----------|----------------------|
//! | `new_tool`       | `#407bff`      | `#70a1ff`      | `#ff9800` | innovative           |
//! | `tutorial`       | `#ff9a00`      | `#ffce54`      | `#e65100` | friendly             |
//! | `comparison`     | `#8a2be2`      | `#ba55d3`      | `#1e88e5` | objective            |
//! | `weekly_summary` | `#0d2a5c`      | `#1e488c`      | `#ffc107` | authoritative        |
//! | `case_study`     | `#2e8b57`      | `#2196f3`      | `#1565c0` | inspiring            |
//! | `qa_interactive` | `#ff9800`      | `#42a5f5`      | `#0d47a1` | interactive          |
//! | `resource_list`  | `#d4a017`      | `#0d2a5c`      | `#ffd54f` | valuable             |

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;
use crate::foundation::error::CovergenError;

/// Article category driving the cover style and default illustration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// New tool announcement.
    NewTool,
    /// Step-by-step tutorial.
    Tutorial,
    /// Head-to-head comparison.
    Comparison,
    /// Weekly roundup.
    WeeklySummary,
    /// Customer or usage case study.
    CaseStudy,
    /// Reader questions and answers.
    QaInteractive,
    /// Curated resource list.
    ResourceList,
}

impl ContentType {
    /// Every content type in publishing-schedule order (Monday first).
    pub const ALL: [Self; 7] = [
        Self::NewTool,
        Self::Tutorial,
        Self::CaseStudy,
        Self::Comparison,
        Self::WeeklySummary,
        Self::QaInteractive,
        Self::ResourceList,
    ];

    /// Wire tag, e.g. `new_tool`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewTool => "new_tool",
            Self::Tutorial => "tutorial",
            Self::Comparison => "comparison",
            Self::WeeklySummary => "weekly_summary",
            Self::CaseStudy => "case_study",
            Self::QaInteractive => "qa_interactive",
            Self::ResourceList => "resource_list",
        }
    }

    /// Content type scheduled for `weekday`.
    pub fn for_weekday(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }

    /// Style profile from the static table.
    pub fn style(self) -> &'static StyleProfile {
        let idx = match self {
            Self::NewTool => 0,
            Self::Tutorial => 1,
            Self::Comparison => 2,
            Self::WeeklySummary => 3,
            Self::CaseStudy => 4,
            Self::QaInteractive => 5,
            Self::ResourceList => 6,
        };
        &STYLE_TABLE[idx]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = CovergenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CovergenError::validation(format!(
                    "unknown content type \"{s}\" (expected one of: {})",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

/// Gradient, accent and mood selected for one render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Color of the top row.
    pub gradient_start: Rgb8,
    /// Color of the bottom row.
    pub gradient_end: Rgb8,
    /// Highlight color for badge text.
    pub accent: Rgb8,
    /// Free-form mood description.
    pub mood_tag: Cow<'static, str>,
}

impl StyleProfile {
    const fn fixed(start: u32, end: u32, accent: u32, mood: &'static str) -> Self {
        Self {
            gradient_start: Rgb8::from_hex(start),
            gradient_end: Rgb8::from_hex(end),
            accent: Rgb8::from_hex(accent),
            mood_tag: Cow::Borrowed(mood),
        }
    }
}

static STYLE_TABLE: [StyleProfile; 7] = [
    StyleProfile::fixed(0x407BFF, 0x70A1FF, 0xFF9800, "innovative"),
    StyleProfile::fixed(0xFF9A00, 0xFFCE54, 0xE65100, "friendly"),
    StyleProfile::fixed(0x8A2BE2, 0xBA55D3, 0x1E88E5, "objective"),
    StyleProfile::fixed(0x0D2A5C, 0x1E488C, 0xFFC107, "authoritative"),
    StyleProfile::fixed(0x2E8B57, 0x2196F3, 0x1565C0, "inspiring"),
    StyleProfile::fixed(0xFF9800, 0x42A5F5, 0x0D47A1, "interactive"),
    StyleProfile::fixed(0xD4A017, 0x0D2A5C, 0xFFD54F, "valuable"),
];

static PRESETS: [StyleProfile; 3] = [
    StyleProfile::fixed(0x407BFF, 0x70A1FF, 0xFF9800, "tech"),
    StyleProfile::fixed(0xFF9A00, 0xFFCE54, 0xE65100, "warm"),
    StyleProfile::fixed(0x8A2BE2, 0xBA55D3, 0xFFFFFF, "purple"),
];

/// Named cover styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Blue gradient.
    Tech,
    /// Orange-to-yellow gradient.
    Warm,
    /// Violet gradient.
    Purple,
}

impl StylePreset {
    /// Profile for this preset.
    pub fn profile(self) -> &'static StyleProfile {
        match self {
            Self::Tech => &PRESETS[0],
            Self::Warm => &PRESETS[1],
            Self::Purple => &PRESETS[2],
        }
    }
}

impl FromStr for StylePreset {
    type Err = CovergenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tech" => Ok(Self::Tech),
            "warm" => Ok(Self::Warm),
            "purple" => Ok(Self::Purple),
            other => Err(CovergenError::validation(format!(
                "unknown style preset \"{other}\" (expected tech, warm or purple)"
            ))),
        }
    }
}

/// Replacement for the content type's table style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleOverride {
    /// One of the named presets, written as its name.
    Preset(StylePreset),
    /// Fully custom profile.
    Custom(StyleProfile),
}

impl StyleOverride {
    /// Resolved profile.
    pub fn profile(&self) -> &StyleProfile {
        match self {
            Self::Preset(p) => p.profile(),
            Self::Custom(profile) => profile,
        }
    }
}

/// Series colors for comparison bars, in series order.
pub const SERIES_PALETTE: [Rgb8; 5] = [
    Rgb8::from_hex(0x4A90E2),
    Rgb8::from_hex(0xF5A623),
    Rgb8::from_hex(0x7ED321),
    Rgb8::from_hex(0xBD10E0),
    Rgb8::from_hex(0x50E3C2),
];

/// Slice colors for pie charts, cycled when there are more slices.
pub const SLICE_PALETTE: [Rgb8; 5] = [
    Rgb8::from_hex(0xFF6B6B),
    Rgb8::from_hex(0x4ECDC4),
    Rgb8::from_hex(0x45B7D1),
    Rgb8::from_hex(0x96CEB4),
    Rgb8::from_hex(0xFFEAA7),
];

/// Fixed colors shared by the diagram recipes.
pub mod ink {
    use crate::foundation::core::Rgb8;

    /// Primary text.
    pub const TEXT: Rgb8 = Rgb8::from_hex(0x333333);
    /// Secondary text and connectors.
    pub const MUTED: Rgb8 = Rgb8::from_hex(0x666666);
    /// Light gridlines.
    pub const GRID: Rgb8 = Rgb8::from_hex(0xE0E0E0);
    /// Flow box fill.
    pub const STEP_FILL: Rgb8 = Rgb8::from_hex(0xE3F2FD);
    /// Flow box outline and step badge.
    pub const STEP_LINE: Rgb8 = Rgb8::from_hex(0x2196F3);
    /// Feature grid background.
    pub const PAPER: Rgb8 = Rgb8::from_hex(0xF8F9FA);
}

#[cfg(test)]
#[path = "../../tests/unit/style/palette.rs"]
mod tests;
