//! # Reports
//!
//! Outcome types produced by the applier. They exist for observability: the
//! CLI prints them and derives its exit status from them.

use crate::error::{AppError, AppResult};
use derive_more::Display;
use std::path::PathBuf;

/// Terminal state of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RuleStatus {
    /// The anchor was found and replaced.
    #[display("applied")]
    Applied,
    /// The replacement text was already present.
    #[display("already applied")]
    AlreadyApplied,
}

/// Outcome of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FileStatus {
    /// At least one rule changed the content.
    #[display("patched")]
    Patched,
    /// Every rule had already been applied.
    #[display("already patched")]
    AlreadyPatched,
    /// The file has no rules.
    #[display("unchanged")]
    Unchanged,
}

impl FileStatus {
    /// Folds per-rule states into the file status.
    pub fn from_rules(rules: &[RuleStatus]) -> Self {
        if rules.is_empty() {
            FileStatus::Unchanged
        } else if rules.contains(&RuleStatus::Applied) {
            FileStatus::Patched
        } else {
            FileStatus::AlreadyPatched
        }
    }
}

/// Successful result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// File status.
    pub status: FileStatus,
    /// Per-rule states, in rule order.
    pub rules: Vec<RuleStatus>,
    /// False on dry runs or when nothing changed.
    pub written: bool,
}

/// Gathered results of a run, in patch set order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per file.
    pub files: Vec<(PathBuf, AppResult<FileReport>)>,
}

impl RunReport {
    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.files.iter().filter(|(_, r)| r.is_err()).count()
    }

    /// True when every file succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Converts the aggregate into a single result.
    pub fn into_result(self) -> AppResult<Self> {
        match self.failed() {
            0 => Ok(self),
            failed => Err(AppError::RunFailed {
                failed,
                total: self.files.len(),
            }),
        }
    }

    /// One human-readable line per file.
    pub fn status_lines(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|(path, result)| match result {
                Ok(report) => format!("{}: {}", path.display(), report.status),
                Err(e) => format!("{}: failed: {}", path.display(), e),
            })
            .collect()
    }
}
