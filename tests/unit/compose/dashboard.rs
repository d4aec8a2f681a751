use super::*;
use crate::compose::job::{Composer, MarkKind, OutputTarget, Recipe, RenderJob};
use crate::compose::samples;
use crate::config::ComposerOpts;
use crate::style::palette::ContentType;
use crate::text::font::FontSet;

fn render(data: DashboardData) -> CovergenResult<crate::compose::job::Rendered> {
    let composer =
        Composer::with_fonts(ComposerOpts::default(), FontSet::builtin(48.0, 24.0)).unwrap();
    composer.render_canvas(&RenderJob::illustration(
        ContentType::WeeklySummary,
        "",
        Recipe::Dashboard(data),
        OutputTarget::Dir(std::env::temp_dir()),
    ))
}

#[test]
fn percentages_always_sum_to_100() {
    for values in [
        vec![35.0, 25.0, 20.0, 15.0, 5.0],
        vec![1.0, 1.0, 1.0],
        vec![2.0, 3.0, 7.0, 11.0, 13.0, 17.0],
        vec![0.1, 0.2, 99.7],
        vec![5.0, 0.0, 5.0],
    ] {
        let p = rounded_percentages(&values);
        assert_eq!(p.iter().sum::<u32>(), 100, "{values:?} -> {p:?}");
    }
}

#[test]
fn percentages_use_largest_remainder() {
    assert_eq!(rounded_percentages(&[35.0, 25.0, 20.0, 15.0, 5.0]), [35, 25, 20, 15, 5]);
    assert_eq!(rounded_percentages(&[1.0, 1.0, 1.0]), [34, 33, 33]);
    assert_eq!(rounded_percentages(&[0.0, 0.0]), [0, 0]);
    assert!(rounded_percentages(&[]).is_empty());
}

#[test]
fn nice_ceiling_steps() {
    assert_eq!(nice_ceiling(95.0), 100.0);
    assert_eq!(nice_ceiling(100.0), 100.0);
    assert_eq!(nice_ceiling(7.0), 10.0);
    assert_eq!(nice_ceiling(1.5), 2.0);
    assert_eq!(nice_ceiling(0.0), 1.0);
}

#[test]
fn ranking_sorts_descending_and_keeps_ties_in_order() {
    let mut data = samples::dashboard();
    data.ranking = vec![
        Datum::new("b", 10.0),
        Datum::new("a", 30.0),
        Datum::new("c", 10.0),
    ];
    let labels: Vec<_> = data.sorted_ranking().into_iter().map(|d| d.label).collect();
    assert_eq!(labels, ["a", "b", "c"]);
}

#[test]
fn sample_renders_slices_and_bars() {
    let rendered = render(samples::dashboard()).unwrap();
    assert_eq!((rendered.canvas.width(), rendered.canvas.height()), (1200, 600));
    assert_eq!(rendered.marks_of(MarkKind::Slice).count(), 5);
    let bars: Vec<_> = rendered.marks_of(MarkKind::Bar).collect();
    assert_eq!(bars.len(), 5);
    for pair in bars.windows(2) {
        assert!(pair[0].rect.height() >= pair[1].rect.height());
    }
    assert!(bars.iter().all(|b| b.rect.x0 >= 600.0));
    assert!(
        rendered
            .marks_of(MarkKind::Slice)
            .all(|s| s.rect.x1 <= 600.0)
    );
}

#[test]
fn invalid_tables_are_rejected() {
    let mut data = samples::dashboard();
    data.shares.clear();
    assert!(render(data).unwrap_err().is_invalid_dataset());

    let mut data = samples::dashboard();
    data.ranking[0].value = -1.0;
    assert!(render(data).unwrap_err().is_invalid_dataset());

    let mut data = samples::dashboard();
    data.max = Some(50.0);
    assert!(data.validate().is_err());

    let mut data = samples::dashboard();
    for s in &mut data.shares {
        s.value = 0.0;
    }
    assert!(data.validate().is_err());
}
