use super::*;
use crate::compose::job::{Composer, MarkKind, OutputTarget, Recipe, RenderJob, Rendered};
use crate::config::ComposerOpts;
use crate::style::palette::ContentType;
use crate::text::font::FontSet;

fn render(items: Vec<String>) -> CovergenResult<Rendered> {
    let composer =
        Composer::with_fonts(ComposerOpts::default(), FontSet::builtin(48.0, 24.0)).unwrap();
    composer.render_canvas(&RenderJob::illustration(
        ContentType::NewTool,
        "核心功能一览",
        Recipe::Grid(GridData { items }),
        OutputTarget::Dir(std::env::temp_dir()),
    ))
}

#[test]
fn item_lines_split_icon_and_label() {
    assert_eq!(item_lines("🤖 智能对话"), ["🤖", "智能对话"]);
    assert_eq!(item_lines("⚡ fast  replies"), ["⚡", "fast replies"]);
    assert_eq!(item_lines("solo"), ["solo"]);
    assert!(item_lines("   ").is_empty());
}

#[test]
fn card_layout_on_default_canvas() {
    let rects = card_rects(CanvasSize::new(800, 600).unwrap());
    assert_eq!(rects[0], Rect::new(110.0, 130.0, 290.0, 260.0));
    assert_eq!(rects[5], Rect::new(510.0, 280.0, 690.0, 410.0));
}

#[test]
fn always_six_cards() {
    for n in [0usize, 3, 6, 9] {
        let items = (0..n).map(|i| format!("* item{i}")).collect();
        let rendered = render(items).unwrap();
        assert_eq!(rendered.marks_of(MarkKind::Card).count(), CARDS, "{n} items");
    }
}

#[test]
fn blank_items_are_malformed() {
    let err = render(vec!["ok".to_owned(), " ".to_owned()]).unwrap_err();
    assert!(err.is_invalid_dataset());
}
