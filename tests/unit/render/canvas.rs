use super::*;

#[test]
fn new_fills_background_and_validates_size() {
    let canvas = Canvas::new(3, 2, Rgb8::new(1, 2, 3)).unwrap();
    assert_eq!(canvas.as_raw().len(), 18);
    assert!(canvas.as_raw().chunks_exact(3).all(|px| px == [1, 2, 3]));
    assert!(Canvas::new(0, 2, Rgb8::WHITE).is_err());
    assert!(Canvas::new(70_000, 2, Rgb8::WHITE).is_err());
}

#[test]
fn blend_pixel_alpha_extremes() {
    let mut canvas = Canvas::new(2, 2, Rgb8::new(10, 20, 30)).unwrap();
    canvas.blend_pixel(0, 0, Rgba8::new(255, 0, 0, 0));
    assert_eq!(canvas.pixel(0, 0), Some(Rgb8::new(10, 20, 30)));
    canvas.blend_pixel(0, 0, Rgba8::new(200, 100, 50, 255));
    assert_eq!(canvas.pixel(0, 0), Some(Rgb8::new(200, 100, 50)));
}

#[test]
fn blend_pixel_is_linear_over() {
    let mut canvas = Canvas::new(1, 1, Rgb8::BLACK).unwrap();
    canvas.blend_pixel(0, 0, Rgba8::new(255, 255, 255, 128));
    assert_eq!(canvas.pixel(0, 0), Some(Rgb8::new(128, 128, 128)));
}

#[test]
fn off_canvas_writes_clip_silently() {
    let mut canvas = Canvas::new(2, 2, Rgb8::BLACK).unwrap();
    let before = canvas.clone();
    canvas.blend_pixel(-1, 0, Rgba8::new(255, 255, 255, 255));
    canvas.blend_pixel(0, 2, Rgba8::new(255, 255, 255, 255));
    assert_eq!(canvas, before);
}

#[test]
fn composite_premul_clips_and_validates_length() {
    let mut canvas = Canvas::new(2, 2, Rgb8::BLACK).unwrap();
    let patch = [255, 255, 255, 255].repeat(4);
    canvas.composite_premul(1, 1, 2, 2, &patch).unwrap();
    assert_eq!(canvas.pixel(0, 0), Some(Rgb8::BLACK));
    assert_eq!(canvas.pixel(1, 1), Some(Rgb8::WHITE));
    assert!(canvas.composite_premul(0, 0, 2, 2, &patch[..8]).is_err());
}

#[test]
fn fingerprint_tracks_pixels() {
    let a = Canvas::new(4, 4, Rgb8::WHITE).unwrap();
    let mut b = a.clone();
    assert_eq!(a.fingerprint(), b.fingerprint());
    b.blend_pixel(3, 3, Rgba8::new(0, 0, 0, 255));
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn save_png_round_trips_dimensions() {
    let dir = std::env::temp_dir().join(format!(
        "covergen_canvas_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("nested").join("out.png");
    let canvas = Canvas::new(5, 3, Rgb8::new(9, 8, 7)).unwrap();
    canvas.save_png(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(canvas.to_rgb_image().dimensions(), (5, 3));
    let _ = std::fs::remove_dir_all(&dir);
}
