use super::*;
use crate::foundation::error::CovergenResult;

/// Ten pixels per character.
struct Monospace;

impl MeasureText for Monospace {
    fn text_width(&mut self, text: &str, _font: &FontHandle) -> CovergenResult<f64> {
        Ok(text.chars().count() as f64 * 10.0)
    }
}

fn font() -> FontHandle {
    FontHandle::builtin(24.0)
}

#[test]
fn lines_fit_the_bound() {
    let text = "the quick brown fox jumps over the lazy dog again and again";
    for bound in [50.0, 80.0, 120.0, 300.0] {
        let block = wrap_text(&mut Monospace, text, &font(), bound).unwrap();
        assert!(!block.is_empty());
        for (line, w) in block.lines().iter().zip(block.widths()) {
            assert!(*w <= bound, "{line:?} is {w}px, bound {bound}");
            assert_eq!(*w, line.chars().count() as f64 * 10.0);
        }
        assert_eq!(block.lines().join(" "), text);
    }
}

#[test]
fn greedy_packs_words() {
    let block = wrap_text(&mut Monospace, "aa bb cc dd", &font(), 50.0).unwrap();
    assert_eq!(block.lines(), ["aa bb", "cc dd"]);
}

#[test]
fn empty_and_blank_input_yield_no_lines() {
    assert!(wrap_text(&mut Monospace, "", &font(), 100.0).unwrap().is_empty());
    let blank = wrap_text(&mut Monospace, " \t\n ", &font(), 100.0).unwrap();
    assert!(blank.is_empty());
    assert_eq!(blank.height(), 0.0);
}

#[test]
fn overlong_word_sits_alone() {
    let block = wrap_text(&mut Monospace, "hi extraordinarily ok", &font(), 40.0).unwrap();
    assert_eq!(block.lines(), ["hi", "extraordinarily", "ok"]);
    assert_eq!(block.max_width(), 150.0);
}

#[test]
fn rewrapping_output_is_idempotent() {
    let text = "one two three four five six seven eight nine ten";
    let first = wrap_text(&mut Monospace, text, &font(), 90.0).unwrap();
    let again = wrap_text(&mut Monospace, &first.lines().join("\n"), &font(), 90.0).unwrap();
    assert_eq!(first, again);
    for line in first.lines() {
        let single = wrap_text(&mut Monospace, line, &font(), 90.0).unwrap();
        assert_eq!(single.lines(), [line.clone()]);
    }
}

#[test]
fn builtin_metrics_drive_the_default_engine() {
    let mut engine = crate::text::engine::TextLayoutEngine::new();
    let f = FontHandle::builtin(18.0);
    let block = wrap_text(&mut engine, "abc defg", &f, 60.0).unwrap();
    // 18px -> scale 2 -> 12px advance
    assert_eq!(block.lines(), ["abc", "defg"]);
    assert_eq!(block.widths(), [36.0, 48.0]);
    assert_eq!(block.height(), 36.0);
}

#[test]
fn outline_metrics_wrap_within_bound_and_rewrap_stably() {
    let fixture = std::path::PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSansMono.ttf"
    ));
    let fonts = crate::text::font::FontSet::resolve(&[fixture], 40.0, 20.0, false).unwrap();
    assert!(!fonts.title.is_builtin());

    let mut engine = crate::text::engine::TextLayoutEngine::new();
    let text = "the quick brown fox jumps over the lazy dog and back again";
    for bound in [300.0, 420.0, 800.0] {
        let block = wrap_text(&mut engine, text, &fonts.title, bound).unwrap();
        assert!(block.lines().len() > 1, "bound {bound}");
        for (line, w) in block.lines().iter().zip(block.widths()) {
            assert!(*w > 0.0 && *w <= bound, "{line:?} is {w}px, bound {bound}");
        }
        assert_eq!(block.lines().join(" "), text);
        assert_eq!(block.height(), block.lines().len() as f64 * 50.0);

        let again = wrap_text(&mut engine, &block.lines().join("\n"), &fonts.title, bound).unwrap();
        assert_eq!(block, again);
    }
}
