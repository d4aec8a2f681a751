use super::*;
use crate::compose::job::{Composer, MarkKind, OutputTarget, RenderJob};
use crate::config::ComposerOpts;
use crate::style::palette::{ContentType, StyleOverride, StylePreset};
use crate::text::font::FontSet;

fn composer() -> Composer {
    Composer::with_fonts(ComposerOpts::default(), FontSet::builtin(48.0, 24.0)).unwrap()
}

fn job(title: &str) -> RenderJob {
    let mut job = RenderJob::cover(
        ContentType::NewTool,
        title,
        OutputTarget::Dir(std::env::temp_dir()),
    );
    job.date = NaiveDate::from_ymd_opt(2024, 3, 9);
    job
}

#[test]
fn clean_title_strips_pipeline_emoji() {
    assert_eq!(clean_title("🔥 AI工具  效率翻倍"), "AI工具 效率翻倍");
    assert_eq!(clean_title("⚡️Fast  news 📚"), "Fast news");
    assert_eq!(clean_title("  🤔 "), "");
}

#[test]
fn decorations_stay_inside_and_under_budget() {
    let size = CanvasSize::new(900, 500).unwrap();
    for seed in 0..50 {
        let decor = place_decorations(size, &DecorOpts::default(), seed);
        assert_eq!(decor.len(), 5);
        let mut area = 0.0;
        for d in &decor {
            assert!(d.center.x - d.radius >= 1.0 - 1e-9 && d.center.x + d.radius <= 899.0 + 1e-9);
            assert!(d.center.y - d.radius >= 1.0 - 1e-9 && d.center.y + d.radius <= 499.0 + 1e-9);
            assert!((10..=30).contains(&d.alpha));
            area += std::f64::consts::PI * d.radius * d.radius;
        }
        assert!(area <= 0.25 * 900.0 * 500.0 + 1e-6);
    }
}

#[test]
fn coverage_cap_shrinks_radii() {
    let size = CanvasSize::new(200, 200).unwrap();
    let opts = DecorOpts {
        count: 10,
        radius_min: 80.0,
        radius_max: 90.0,
        max_coverage: 0.1,
        ..DecorOpts::default()
    };
    let decor = place_decorations(size, &opts, 3);
    let area: f64 = decor
        .iter()
        .map(|d| std::f64::consts::PI * d.radius * d.radius)
        .sum();
    assert!(area <= 0.1 * 200.0 * 200.0 + 1e-6);
}

#[test]
fn decorations_are_seeded() {
    let size = CanvasSize::new(900, 500).unwrap();
    let a = place_decorations(size, &DecorOpts::default(), 11);
    let b = place_decorations(size, &DecorOpts::default(), 11);
    let c = place_decorations(size, &DecorOpts::default(), 12);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn cover_keeps_the_top_row_on_the_gradient_start() {
    let rendered = composer().render_canvas(&job("AI工具效率翻倍的秘密武器")).unwrap();
    let start = ContentType::NewTool.style().gradient_start;
    let row = rendered.canvas.row(0).unwrap();
    assert!(row.chunks_exact(3).all(|px| px == start.to_array().as_slice()));
    assert_eq!(rendered.marks_of(MarkKind::Decoration).count(), 5);
    assert_eq!(rendered.marks_of(MarkKind::Date).count(), 1);
    assert_eq!(rendered.marks_of(MarkKind::Badge).count(), 0);
}

#[test]
fn long_titles_wrap_inside_the_margins() {
    let title = "Seven practical ways to double your productivity with AI tools this week";
    let rendered = composer().render_canvas(&job(title)).unwrap();
    let lines: Vec<_> = rendered.marks_of(MarkKind::TitleLine).collect();
    assert!(lines.len() > 1);
    for m in lines {
        assert!(m.rect.x0 >= 50.0 - 1e-9 && m.rect.x1 <= 850.0 + 1e-9, "{:?}", m.rect);
    }
}

#[test]
fn label_badge_sits_top_right() {
    let mut j = job("Weekly picks");
    j.label = Some("ChatGPT".to_owned());
    j.style_override = Some(StyleOverride::Preset(StylePreset::Purple));
    let rendered = composer().render_canvas(&j).unwrap();
    let badge = rendered.marks_of(MarkKind::Badge).next().unwrap().rect;
    assert_eq!(badge.x1, 880.0);
    assert_eq!(badge.y0, 20.0);
    assert!(badge.width() >= 200.0);
    assert_eq!(
        rendered.canvas.pixel(0, 0),
        Some(StylePreset::Purple.profile().gradient_start)
    );
}

#[test]
fn blank_titles_are_rejected() {
    let err = composer().render_canvas(&job(" 🔥 ")).unwrap_err();
    assert!(matches!(err, CovergenError::Validation(_)));
}
