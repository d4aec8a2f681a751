use crate::foundation::core::Rgb8;
use crate::render::canvas::Canvas;

/// Color of row `y` in a vertical gradient of `height` rows from `start` to `end`.
///
/// Row 0 is `start`, row `height - 1` is `end`; a single-row gradient is `start`.
pub fn gradient_row_color(start: Rgb8, end: Rgb8, y: u32, height: u32) -> Rgb8 {
    let h1 = height.max(1) - 1;
    let t = if h1 == 0 {
        0.0
    } else {
        f64::from(y.min(h1)) / f64::from(h1)
    };
    let lerp = |a: u8, b: u8| -> u8 {
        let af = f64::from(a);
        let bf = f64::from(b);
        (af * (1.0 - t) + bf * t).round().clamp(0.0, 255.0) as u8
    };
    Rgb8::new(lerp(start.r, end.r), lerp(start.g, end.g), lerp(start.b, end.b))
}

/// Overwrite every row of `canvas` with a top-to-bottom linear gradient.
pub fn fill_vertical_gradient(canvas: &mut Canvas, start: Rgb8, end: Rgb8) {
    let height = canvas.height();
    for y in 0..height {
        canvas.fill_row(y, gradient_row_color(start, end, y, height));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
