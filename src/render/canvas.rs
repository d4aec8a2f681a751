use std::path::Path;

use crate::foundation::core::{CanvasSize, Rgb8, Rgba8};
use crate::foundation::error::{CovergenError, CovergenResult};
use crate::foundation::math::{Fnv1a64, mul_div255_u8};

/// Owned RGB8 pixel buffer that every drawing primitive mutates in place.
///
/// Pixels are tightly packed, row-major, three bytes per pixel. Drawing outside the buffer is
/// legal and clips silently.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fingerprint", &format_args!("{:016x}", self.fingerprint()))
            .finish()
    }
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb8) -> CovergenResult<Self> {
        CanvasSize::new(width, height)?;
        let len = (width as usize) * (height as usize) * 3;
        let mut pixels = Vec::with_capacity(len);
        for _ in 0..(width as usize) * (height as usize) {
            pixels.extend_from_slice(&background.to_array());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a canvas of `size` filled with `background`.
    pub fn with_size(size: CanvasSize, background: Rgb8) -> CovergenResult<Self> {
        Self::new(size.width, size.height, background)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`CanvasSize`].
    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Raw RGB8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgb8::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
        ))
    }

    /// Borrow one row as RGB8 bytes; `None` outside the canvas.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        Some(&self.pixels[start..start + stride])
    }

    /// Overwrite a whole row with an opaque color; rows outside the canvas are ignored.
    pub fn fill_row(&mut self, y: u32, color: Rgb8) {
        if y >= self.height {
            return;
        }
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        for px in self.pixels[start..start + stride].chunks_exact_mut(3) {
            px.copy_from_slice(&color.to_array());
        }
    }

    /// Composite a straight-alpha color over one pixel with linear alpha blending.
    ///
    /// `a == 0` leaves the pixel untouched and `a == 255` overwrites it.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba8) {
        if color.a == 0 || x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height)
        {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.over_premul_at(i, color.premultiplied());
    }

    /// Composite a premultiplied RGBA8 patch whose top-left corner sits at `(x0, y0)`.
    ///
    /// The patch is clipped to the canvas; transparent source pixels leave the canvas untouched.
    pub fn composite_premul(
        &mut self,
        x0: i64,
        y0: i64,
        width: u32,
        height: u32,
        rgba8_premul: &[u8],
    ) -> CovergenResult<()> {
        if rgba8_premul.len() != (width as usize) * (height as usize) * 4 {
            return Err(CovergenError::validation(
                "composite_premul expects a tightly packed rgba8 patch",
            ));
        }
        self.blit_premul(x0, y0, width, height, rgba8_premul);
        Ok(())
    }

    pub(crate) fn blit_premul(
        &mut self,
        x0: i64,
        y0: i64,
        width: u32,
        height: u32,
        rgba8_premul: &[u8],
    ) {
        if width == 0 || height == 0 {
            return;
        }
        let stride = width as usize * 4;
        for (py, row) in rgba8_premul.chunks_exact(stride).take(height as usize).enumerate() {
            let cy = y0 + py as i64;
            if cy < 0 || cy >= i64::from(self.height) {
                continue;
            }
            for (px, src) in row.chunks_exact(4).enumerate() {
                let cx = x0 + px as i64;
                if src[3] == 0 || cx < 0 || cx >= i64::from(self.width) {
                    continue;
                }
                let i = self.index(cx as u32, cy as u32);
                self.over_premul_at(i, [src[0], src[1], src[2], src[3]]);
            }
        }
    }

    /// Stable 64-bit digest of dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.pixels);
        h.finish()
    }

    /// Encode as PNG at `path`, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> CovergenResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CovergenError::io(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| CovergenError::io(format!("write png '{}': {e}", path.display())))
    }

    /// Copy into an [`image::RgbImage`].
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let i = self.index(x, y);
            image::Rgb([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }

    fn over_premul_at(&mut self, i: usize, src: [u8; 4]) {
        let inv = 255u16 - u16::from(src[3]);
        for c in 0..3 {
            let d = mul_div255_u8(u16::from(self.pixels[i + c]), inv);
            self.pixels[i + c] = src[c].saturating_add(d);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
