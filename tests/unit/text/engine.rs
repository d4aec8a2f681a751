use super::*;
use crate::foundation::core::Rgb8;

#[test]
fn builtin_width_uses_fixed_advance() {
    let mut engine = TextLayoutEngine::new();
    let font = FontHandle::builtin(48.0);
    assert_eq!(engine.text_width("AI", &font).unwrap(), 60.0);
    assert_eq!(engine.text_width("", &font).unwrap(), 0.0);
}

#[test]
fn draw_text_marks_pixels_and_respects_transparency() {
    let mut engine = TextLayoutEngine::new();
    let font = FontHandle::builtin(18.0);
    let mut canvas = Canvas::new(80, 30, Rgb8::WHITE).unwrap();
    let before = canvas.clone();

    canvas
        .draw_text(&mut engine, 4.0, 4.0, "Hi", &font, Rgba8::new(0, 0, 0, 0))
        .unwrap();
    assert_eq!(canvas, before);

    canvas
        .draw_text(&mut engine, 4.0, 4.0, "Hi", &font, Rgb8::BLACK)
        .unwrap();
    assert_ne!(canvas, before);
}

#[test]
fn centered_text_is_symmetric_about_center() {
    let mut engine = TextLayoutEngine::new();
    let font = FontHandle::builtin(9.0);
    let mut canvas = Canvas::new(40, 12, Rgb8::WHITE).unwrap();
    let w = draw_centered(&mut engine, &mut canvas, 20.0, 0.0, "II", &font, Rgb8::BLACK.opaque())
        .unwrap();
    assert_eq!(w, 12.0);
    // Text spans x in [14, 26); nothing is drawn left of it.
    for x in 0..14 {
        for y in 0..12 {
            assert_eq!(canvas.pixel(x, y), Some(Rgb8::WHITE));
        }
    }
}

fn fixture_font(size_px: f32) -> FontHandle {
    let path = std::path::PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSansMono.ttf"
    ));
    let set = crate::text::font::FontSet::resolve(&[path], size_px, size_px, false).unwrap();
    assert!(!set.title.is_builtin());
    set.title
}

#[test]
fn outline_width_grows_with_text() {
    let mut engine = TextLayoutEngine::new();
    let font = fixture_font(32.0);
    let one = engine.text_width("covers", &font).unwrap();
    let two = engine.text_width("covers covers", &font).unwrap();
    assert!(one > 0.0);
    assert!(two > one * 2.0 - 1.0, "{one} -> {two}");
    assert!(engine.text_width("covers", &font.with_size(64.0)).unwrap() > one * 1.5);
}

#[test]
fn outline_draw_text_rasterizes_glyphs_inside_its_box() {
    let mut engine = TextLayoutEngine::new();
    let font = fixture_font(32.0);
    let mut canvas = Canvas::new(240, 80, Rgb8::WHITE).unwrap();
    let before = canvas.fingerprint();

    canvas
        .draw_text(&mut engine, 10.0, 10.0, "Hello", &font, Rgb8::BLACK)
        .unwrap();
    assert_ne!(canvas.fingerprint(), before);

    let width = engine.text_width("Hello", &font).unwrap();
    let dark = (0..80u32)
        .flat_map(|y| (0..240u32).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.pixel(x, y).is_some_and(|p| p.r < 128))
        .collect::<Vec<_>>();
    assert!(!dark.is_empty());
    for (x, y) in dark {
        assert!(f64::from(x) >= 8.0 && f64::from(x) <= 12.0 + width, "x {x}");
        assert!(y >= 8 && y <= 60, "y {y}");
    }
}
