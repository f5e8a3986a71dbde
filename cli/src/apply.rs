#![deny(missing_docs)]

//! # Apply / Check Commands
//!
//! Loads the patch set (built-in table or `--patches` file), applies it to the
//! tree under `--root`, and prints one status line per file.

use srcpatch_core::{
    apply_patch_set, builtin_patch_set, load_patch_set, AppError, AppResult, ApplyOptions,
    DiskStore, FileStatus, RunReport,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments shared by `apply` and `check`.
#[derive(clap::Args, Debug, Clone)]
pub struct PatchArgs {
    /// Directory containing the vendored tree (e.g. the parent of `JUCE/`).
    #[clap(long, env = "SRCPATCH_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// YAML patch file. Uses the built-in JUCE table when omitted.
    #[clap(long, env = "SRCPATCH_PATCHES")]
    pub patches: Option<PathBuf>,
}

/// Runs the patch set and prints the outcome.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `options` - `dry_run` selects `check` behaviour.
pub async fn execute(args: &PatchArgs, options: ApplyOptions) -> AppResult<RunReport> {
    let patch_set = match &args.patches {
        Some(path) => {
            tracing::info!("loading patch file {}", path.display());
            load_patch_set(path)?
        }
        None => builtin_patch_set()?,
    };

    if !args.root.is_dir() {
        return Err(AppError::Config(format!(
            "Root directory not found: {}",
            args.root.display()
        )));
    }

    let store = Arc::new(DiskStore::new(&args.root));
    let report = apply_patch_set(patch_set, store, options).await;

    for line in report.status_lines() {
        println!("{}", line);
    }
    println!("{}", summary(&report, options));

    report.into_result()
}

fn summary(report: &RunReport, options: ApplyOptions) -> String {
    let count = |status: FileStatus| {
        report
            .files
            .iter()
            .filter(|(_, r)| matches!(r, Ok(f) if f.status == status))
            .count()
    };
    let patched_label = if options.dry_run { "to patch" } else { "patched" };

    format!(
        "{} file(s): {} {}, {} already patched, {} unchanged, {} failed",
        report.files.len(),
        count(FileStatus::Patched),
        patched_label,
        count(FileStatus::AlreadyPatched),
        count(FileStatus::Unchanged),
        report.failed()
    )
}
