use super::*;
use crate::compose::samples;
use crate::foundation::core::Rgb8;

fn composer() -> Composer {
    Composer::with_fonts(ComposerOpts::default(), FontSet::builtin(48.0, 24.0)).unwrap()
}

fn out() -> OutputTarget {
    OutputTarget::Dir(std::env::temp_dir())
}

#[test]
fn job_json_nests_the_recipe_under_kind() {
    let json = r#"{
        "content_type": "tutorial",
        "recipe": { "kind": "flow", "steps": ["a", "b"] },
        "output": { "file": "out/flow.png" }
    }"#;
    let job: RenderJob = serde_json::from_str(json).unwrap();
    assert_eq!(job.content_type, ContentType::Tutorial);
    assert_eq!(job.recipe.kind(), RecipeKind::Flow);
    assert_eq!(job.output, OutputTarget::File(PathBuf::from("out/flow.png")));
    assert_eq!(job.seed, 0);
    assert!(job.title.is_empty());

    let back: RenderJob = serde_json::from_str(&serde_json::to_string(&job).unwrap()).unwrap();
    assert_eq!(back, job);
}

#[test]
fn cover_is_the_default_recipe() {
    let json = r##"{
        "content_type": "new_tool",
        "title": "hello",
        "style_override": { "gradient_start": "#000000", "gradient_end": "#ffffff",
                            "accent": "#ff0000", "mood_tag": "mono" },
        "date": "2024-01-31",
        "output": { "dir": "out" }
    }"##;
    let job: RenderJob = serde_json::from_str(json).unwrap();
    assert_eq!(job.recipe, Recipe::Cover);
    assert_eq!(job.style().gradient_start, Rgb8::BLACK);
    assert_eq!(job.date, NaiveDate::from_ymd_opt(2024, 1, 31));
}

#[test]
fn unknown_fields_and_tags_are_rejected() {
    let extra = r#"{ "content_type": "tutorial", "output": { "dir": "o" }, "colour": 1 }"#;
    assert!(serde_json::from_str::<RenderJob>(extra).is_err());
    let bad_type = r#"{ "content_type": "podcast", "output": { "dir": "o" } }"#;
    assert!(serde_json::from_str::<RenderJob>(bad_type).is_err());
    let bad_recipe = r#"{ "content_type": "tutorial", "recipe": { "kind": "sankey" },
                          "output": { "dir": "o" } }"#;
    assert!(serde_json::from_str::<RenderJob>(bad_recipe).is_err());
}

#[test]
fn recipe_kind_parses_case_insensitively() {
    assert_eq!("Grid".parse::<RecipeKind>().unwrap(), RecipeKind::Grid);
    assert!(matches!(
        "pie".parse::<RecipeKind>(),
        Err(CovergenError::Validation(_))
    ));
}

#[test]
fn content_types_map_to_illustrations() {
    assert_eq!(ContentType::Comparison.illustration(), RecipeKind::Comparison);
    assert_eq!(ContentType::Tutorial.illustration(), RecipeKind::Flow);
    assert_eq!(ContentType::WeeklySummary.illustration(), RecipeKind::Dashboard);
    assert_eq!(ContentType::NewTool.illustration(), RecipeKind::Grid);
}

#[test]
fn size_follows_recipe_unless_overridden() {
    let c = composer();
    let cover = RenderJob::cover(ContentType::NewTool, "t", out());
    assert_eq!(c.size_for(&cover), CanvasSize { width: 900, height: 500 });
    let dash = RenderJob::illustration(
        ContentType::WeeklySummary,
        "",
        samples::recipe(RecipeKind::Dashboard),
        out(),
    );
    assert_eq!(c.size_for(&dash), CanvasSize { width: 1200, height: 600 });
    let mut flow = RenderJob::illustration(
        ContentType::Tutorial,
        "",
        samples::recipe(RecipeKind::Flow),
        out(),
    );
    assert_eq!(c.size_for(&flow), CanvasSize { width: 800, height: 600 });
    flow.size = Some(CanvasSize { width: 640, height: 480 });
    let rendered = c.render_canvas(&flow).unwrap();
    assert_eq!(rendered.canvas.size(), CanvasSize { width: 640, height: 480 });
}

#[test]
fn zero_sized_canvas_is_a_validation_error() {
    let mut job = RenderJob::cover(ContentType::NewTool, "t", out());
    job.size = Some(CanvasSize { width: 0, height: 10 });
    assert!(matches!(
        composer().render_canvas(&job),
        Err(CovergenError::Validation(_))
    ));
}

#[test]
fn invalid_datasets_write_nothing() {
    let dir = std::env::temp_dir().join(format!(
        "covergen_job_invalid_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let job = RenderJob::illustration(
        ContentType::Tutorial,
        "",
        Recipe::Flow(FlowData { steps: vec![] }),
        OutputTarget::Dir(dir.clone()),
    );
    assert!(composer().render(&job).unwrap_err().is_invalid_dataset());
    assert!(!dir.exists());
}

#[test]
fn render_writes_a_decodable_png() {
    let dir = std::env::temp_dir().join(format!(
        "covergen_job_png_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let job = RenderJob::illustration(
        ContentType::NewTool,
        samples::heading(RecipeKind::Grid),
        samples::recipe(RecipeKind::Grid),
        OutputTarget::Dir(dir.clone()),
    );
    let path = composer().render(&job).unwrap();
    assert!(path.starts_with(&dir));
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("grid_new_tool_"));
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (800, 600));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn batch_keeps_order_and_isolates_failures() {
    let jobs = vec![
        RenderJob::illustration(ContentType::Tutorial, "", samples::recipe(RecipeKind::Flow), out()),
        RenderJob::illustration(
            ContentType::Tutorial,
            "",
            Recipe::Grid(GridData { items: vec![" ".into()] }),
            out(),
        ),
        RenderJob::cover(ContentType::CaseStudy, "ok", out()),
    ];
    let threading = BatchThreading {
        parallel: true,
        threads: Some(2),
    };
    let results = composer().render_batch_canvases(&jobs, &threading).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].as_ref().unwrap_err().is_invalid_dataset());
    assert_eq!(
        results[2].as_ref().unwrap().canvas.size(),
        CanvasSize { width: 900, height: 500 }
    );
}
