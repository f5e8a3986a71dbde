//! # Patch Applier
//!
//! Applies a [`PatchSet`] through a [`FileStore`].
//!
//! - **Rules**: exact literal search, first occurrence only, applied in
//!   order against the mutating buffer.
//! - **Idempotence**: a rule whose replacement is already present is skipped.
//! - **Fail loud**: a rule that finds neither text fails its file, and that
//!   file is not written.
//! - **Scatter/gather**: one task per file; every task is awaited before the
//!   report is returned.

use crate::error::{AppError, AppResult};
use crate::report::{FileReport, FileStatus, RuleStatus, RunReport};
use crate::rule::{PatchRule, PatchSet};
use crate::store::FileStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Run-wide switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Check every rule but write nothing.
    pub dry_run: bool,
}

/// Applies one rule to `content` in place.
///
/// Returns `None` when neither the replacement nor the anchor is present;
/// `content` is untouched in that case.
pub fn apply_rule(content: &mut String, rule: &PatchRule) -> Option<RuleStatus> {
    if content.contains(rule.replacement_text()) {
        return Some(RuleStatus::AlreadyApplied);
    }

    let start = content.find(rule.match_text())?;
    let end = start + rule.match_text().len();
    content.replace_range(start..end, rule.replacement_text());
    Some(RuleStatus::Applied)
}

/// Applies `rules` in order to a copy of `content`.
///
/// `path` is only used to label errors.
pub fn apply_rules(
    path: &Path,
    content: &str,
    rules: &[PatchRule],
) -> AppResult<(String, Vec<RuleStatus>)> {
    let mut buffer = content.to_string();
    let mut statuses = Vec::with_capacity(rules.len());

    for (index, rule) in rules.iter().enumerate() {
        let status = apply_rule(&mut buffer, rule).ok_or_else(|| AppError::PatchFailed {
            path: path.to_owned(),
            rule: index,
            anchor: rule.match_text().to_string(),
        })?;
        tracing::debug!("{:?} rule #{}: {}", path, index, status);
        statuses.push(status);
    }

    Ok((buffer, statuses))
}

/// Reads, patches and (unless dry-running) writes back a single file.
///
/// The write happens only after every rule succeeded, so a failing file is
/// left exactly as it was.
pub async fn patch_file<S: FileStore + ?Sized>(
    store: &S,
    path: &Path,
    rules: &[PatchRule],
    options: ApplyOptions,
) -> AppResult<FileReport> {
    let content = store.read(path).await?;
    let (patched, rule_states) = apply_rules(path, &content, rules)?;
    let status = FileStatus::from_rules(&rule_states);

    let written = status == FileStatus::Patched && !options.dry_run;
    if written {
        store.write(path, &patched).await?;
    }

    Ok(FileReport {
        status,
        rules: rule_states,
        written,
    })
}

/// Applies the whole set, one task per file.
///
/// A failing file does not cancel its siblings. The report lists every file
/// in patch set order once all tasks are done.
pub async fn apply_patch_set<S: FileStore + 'static>(
    patch_set: PatchSet,
    store: Arc<S>,
    options: ApplyOptions,
) -> RunReport {
    tracing::info!(
        "applying patches to {} file(s){}",
        patch_set.len(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let tasks = patch_set.into_iter().map(|(path, rules)| {
        let store = Arc::clone(&store);
        let task_path = path.clone();
        let handle = tokio::spawn(async move {
            patch_file(&*store, &task_path, &rules, options).await
        });

        async move {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(AppError::TaskAborted {
                    path: path.clone(),
                    reason: e.to_string(),
                }),
            };
            if let Err(e) = &result {
                tracing::warn!("{}", e);
            }
            (path, result)
        }
    });

    let files: Vec<(PathBuf, AppResult<FileReport>)> = futures::future::join_all(tasks).await;
    RunReport { files }
}
