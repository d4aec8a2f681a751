use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{Datelike as _, NaiveDate};
use clap::{Args, Parser, Subcommand};
use covergen::{
    BatchThreading, Composer, ComposerOpts, ContentType, FontSet, GlyphSource, OutputTarget,
    Recipe, RecipeKind, RenderJob, StyleOverride, StylePreset, samples,
};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "covergen", version, about = "Compose article covers and illustrations as PNG")]
struct Cli {
    /// Composer configuration JSON; built-in defaults when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a gradient cover with a wrapped title.
    Cover(CoverArgs),
    /// Render a chart or diagram illustration.
    Illustrate(IllustrateArgs),
    /// Render one job, or an array of jobs, from JSON.
    Job(JobArgs),
    /// Print the resolved font sources.
    Fonts,
}

#[derive(Args, Debug)]
struct OutArgs {
    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Directory receiving a generated file name.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,
}

impl OutArgs {
    fn target(self) -> OutputTarget {
        match self.out {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Dir(self.out_dir),
        }
    }
}

#[derive(Parser, Debug)]
struct CoverArgs {
    /// Content type tag (new_tool, tutorial, comparison, weekly_summary, ...); today's slot in the
    /// weekly schedule when absent.
    #[arg(long = "type")]
    content_type: Option<ContentType>,

    /// Cover title.
    #[arg(long)]
    title: String,

    /// Badge text shown top-right.
    #[arg(long)]
    label: Option<String>,

    /// Named style replacing the content type's table entry.
    #[arg(long)]
    style: Option<StylePreset>,

    /// Seed for decoration placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Date stamp (YYYY-MM-DD); today when absent.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[command(flatten)]
    out: OutArgs,
}

#[derive(Parser, Debug)]
struct IllustrateArgs {
    /// Content type tag; picks the recipe when `--recipe` is absent.
    #[arg(long = "type")]
    content_type: ContentType,

    /// Layout recipe (comparison, dashboard, flow, grid).
    #[arg(long)]
    recipe: Option<RecipeKind>,

    /// Dataset JSON for the recipe.
    #[arg(long, conflicts_with = "sample", required_unless_present = "sample")]
    data: Option<PathBuf>,

    /// Use the bundled demo dataset.
    #[arg(long)]
    sample: bool,

    /// Chart heading.
    #[arg(long)]
    title: Option<String>,

    #[command(flatten)]
    out: OutArgs,
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Job JSON: one object or an array.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render an array of jobs on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = load_opts(cli.config.as_deref())?;
    match cli.cmd {
        Command::Cover(args) => cmd_cover(opts, args),
        Command::Illustrate(args) => cmd_illustrate(opts, args),
        Command::Job(args) => cmd_job(opts, args),
        Command::Fonts => cmd_fonts(opts),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<ComposerOpts> {
    let opts = match path {
        Some(p) => ComposerOpts::from_path(p)?,
        None => ComposerOpts::default(),
    };
    Ok(opts.with_env_overrides())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn cmd_cover(opts: ComposerOpts, args: CoverArgs) -> anyhow::Result<()> {
    let content_type = args
        .content_type
        .unwrap_or_else(|| ContentType::for_weekday(chrono::Local::now().weekday()));
    let composer = Composer::new(opts)?;
    let mut job = RenderJob::cover(content_type, args.title, args.out.target());
    job.label = args.label;
    job.style_override = args.style.map(StyleOverride::Preset);
    job.seed = args.seed;
    job.date = args.date;

    let path = composer.render(&job)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_illustrate(opts: ComposerOpts, args: IllustrateArgs) -> anyhow::Result<()> {
    let kind = args
        .recipe
        .unwrap_or_else(|| args.content_type.illustration());
    if kind == RecipeKind::Cover {
        anyhow::bail!("'cover' is not an illustration recipe; use the cover subcommand");
    }

    let recipe = match &args.data {
        Some(path) => load_recipe(kind, path)?,
        None => samples::recipe(kind),
    };
    let title = match args.title {
        Some(t) => t,
        None if args.sample => samples::heading(kind).to_owned(),
        None => String::new(),
    };

    let composer = Composer::new(opts)?;
    let job = RenderJob::illustration(args.content_type, title, recipe, args.out.target());
    let path = composer.render(&job)?;
    println!("{}", path.display());
    Ok(())
}

fn load_recipe(kind: RecipeKind, path: &Path) -> anyhow::Result<Recipe> {
    let recipe = match kind {
        RecipeKind::Cover => Recipe::Cover,
        RecipeKind::Comparison => Recipe::Comparison(read_json(path, "comparison dataset")?),
        RecipeKind::Dashboard => Recipe::Dashboard(read_json(path, "dashboard dataset")?),
        RecipeKind::Flow => Recipe::Flow(read_json(path, "flow dataset")?),
        RecipeKind::Grid => Recipe::Grid(read_json(path, "grid dataset")?),
    };
    Ok(recipe)
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum JobFile {
    One(Box<RenderJob>),
    Many(Vec<RenderJob>),
}

fn cmd_job(opts: ComposerOpts, args: JobArgs) -> anyhow::Result<()> {
    let jobs = match read_json::<JobFile>(&args.in_path, "job")? {
        JobFile::One(job) => vec![*job],
        JobFile::Many(jobs) => jobs,
    };
    let composer = Composer::new(opts)?;
    let threading = BatchThreading {
        parallel: args.parallel,
        threads: args.threads,
    };

    let mut failed = 0usize;
    for (i, result) in composer.render_batch(&jobs, &threading)?.into_iter().enumerate() {
        match result {
            Ok(path) => println!("{}", path.display()),
            Err(err) => {
                failed += 1;
                eprintln!("job {i}: {err}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} job(s) failed", jobs.len());
    }
    Ok(())
}

fn cmd_fonts(opts: ComposerOpts) -> anyhow::Result<()> {
    let fonts = FontSet::resolve(
        &opts.font_candidates,
        opts.title_px,
        opts.body_px,
        opts.allow_builtin_fallback,
    )?;
    for (role, handle) in [("title", &fonts.title), ("body", &fonts.body)] {
        println!("{role}:");
        println!("  size_px: {}", handle.size_px());
        match handle.source() {
            GlyphSource::Outline { path, bytes } => {
                println!("  source:  {}", path.display());
                println!("  sha256:  {}", sha256_hex(bytes));
            }
            GlyphSource::Builtin => println!("  source:  built-in 5x7 bitmap"),
        }
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
