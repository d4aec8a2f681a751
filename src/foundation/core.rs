use serde::{Deserialize, Serialize};

use crate::foundation::error::{CovergenError, CovergenResult};

pub use kurbo::{Point, Rect, Vec2};

/// Largest edge a canvas may have; the rasterizer addresses pixels with `u16`.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Create a validated size with both edges in `1..=MAX_CANVAS_EDGE`.
    pub fn new(width: u32, height: u32) -> CovergenResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Check both edges are non-zero and addressable by the rasterizer.
    pub fn validate(self) -> CovergenResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CovergenError::validation(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_EDGE || self.height > MAX_CANVAS_EDGE {
            return Err(CovergenError::validation(format!(
                "canvas edge exceeds {MAX_CANVAS_EDGE}px, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Total pixel count.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Opaque 8-bit RGB color; serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct from a packed `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Attach straight alpha.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, a)
    }

    /// Fully opaque RGBA.
    pub const fn opaque(self) -> Rgba8 {
        self.with_alpha(255)
    }

    /// Channels as an array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// 8-bit RGB color with straight (non-premultiplied) alpha; serialized as `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; 0 is fully transparent, 255 fully opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// Premultiplied channels, rounding to nearest.
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { crate::foundation::math::mul_div255_u8(u16::from(c), a) };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

impl From<Rgb8> for Rgba8 {
    fn from(c: Rgb8) -> Self {
        c.opaque()
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        ))
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = Rgba8::deserialize(deserializer)?;
        if c.a != 255 {
            return Err(serde::de::Error::custom(
                "opaque color expected (#RRGGBB or [r,g,b])",
            ));
        }
        Ok(c.rgb())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse `#RRGGBB` / `#RRGGBBAA` (the `#` is optional, case-insensitive).
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
