use super::*;
use crate::foundation::core::Rgb8;

#[test]
fn scale_tracks_requested_size() {
    assert_eq!(scale_for(4.0), 1);
    assert_eq!(scale_for(24.0), 3);
    assert_eq!(scale_for(48.0), 5);
    assert_eq!(scale_for(f32::NAN), 1);
    assert_eq!(advance(48.0), 30);
    assert_eq!(line_height(24.0), 27);
}

#[test]
fn width_counts_chars_not_bytes() {
    assert_eq!(text_width("abc", 9.0), 18);
    assert_eq!(text_width("效率", 9.0), 12);
    assert_eq!(text_width("", 48.0), 0);
}

#[test]
fn printable_ascii_has_glyphs() {
    assert!(glyph(' ').is_some());
    assert!(glyph('~').is_some());
    assert_eq!(glyph('|'), Some(&[0b00100; 7]));
    assert!(glyph('\u{7f}').is_none());
    assert!(glyph('效').is_none());
}

#[test]
fn draws_inside_its_cell() {
    let mut canvas = Canvas::new(20, 20, Rgb8::WHITE).unwrap();
    draw(&mut canvas, 2.0, 2.0, "|", 9.0, Rgb8::BLACK.opaque());
    // '|' is column 2; the first glyph row sits one row below the cell top
    assert_eq!(canvas.pixel(4, 3), Some(Rgb8::BLACK));
    assert_eq!(canvas.pixel(4, 9), Some(Rgb8::BLACK));
    assert_eq!(canvas.pixel(4, 2), Some(Rgb8::WHITE));
    assert_eq!(canvas.pixel(3, 5), Some(Rgb8::WHITE));
}

#[test]
fn unknown_chars_draw_a_hollow_box() {
    let mut canvas = Canvas::new(10, 12, Rgb8::WHITE).unwrap();
    draw(&mut canvas, 0.0, 0.0, "效", 9.0, Rgb8::BLACK.opaque());
    assert_eq!(canvas.pixel(0, 1), Some(Rgb8::BLACK));
    assert_eq!(canvas.pixel(4, 7), Some(Rgb8::BLACK));
    assert_eq!(canvas.pixel(2, 4), Some(Rgb8::WHITE));
}
