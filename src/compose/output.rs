use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};

use crate::compose::job::{OutputTarget, RecipeKind};
use crate::foundation::error::CovergenResult;
use crate::render::canvas::Canvas;
use crate::style::palette::ContentType;

static SEQ: AtomicU64 = AtomicU64::new(0);

/// `{recipe}_{content_type}_{YYYYMMDD_HHMMSS}_{nanos}_{seq}.png`.
///
/// `seq` is a process-wide counter, so names never repeat within one process even when the clock
/// does not advance between calls.
pub fn generated_file_name(recipe: RecipeKind, content_type: ContentType, now: DateTime<Local>) -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}_{}_{}_{:09}_{seq}.png",
        recipe.as_str(),
        content_type.as_str(),
        now.format("%Y%m%d_%H%M%S"),
        now.timestamp_subsec_nanos(),
    )
}

/// Concrete path for `target`; directory targets get a generated name.
pub fn resolve_path(target: &OutputTarget, recipe: RecipeKind, content_type: ContentType) -> PathBuf {
    match target {
        OutputTarget::File(path) => path.clone(),
        OutputTarget::Dir(dir) => dir.join(generated_file_name(recipe, content_type, Local::now())),
    }
}

/// Encode `canvas` as PNG at `path`, creating parent directories.
pub fn write_png(canvas: &Canvas, path: &Path) -> CovergenResult<()> {
    canvas.save_png(path)?;
    tracing::info!(
        path = %path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "wrote image"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/output.rs"]
mod tests;
