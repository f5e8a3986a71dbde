//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Only `std::io::Error` converts implicitly; every other variant is built
/// explicitly at the failure site.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The target file is missing or could not be decoded as UTF-8 text.
    #[from(ignore)]
    #[display("File not found or unreadable: {} ({source})", path.display())]
    FileNotFound {
        /// Path as given in the patch set.
        path: PathBuf,
        /// Underlying read failure.
        source: std::io::Error,
    },

    /// Neither the anchor text nor the replacement was present.
    ///
    /// Usually means the vendored source moved on and the rule is stale.
    #[from(ignore)]
    #[display(
        "Patch failed for {} (rule #{rule}): anchor not found: {anchor:?}",
        path.display()
    )]
    PatchFailed {
        /// File being patched.
        path: PathBuf,
        /// Zero-based index of the rule within the file's rule list.
        rule: usize,
        /// The anchor text that could not be located.
        anchor: String,
    },

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A rule violated its construction invariants.
    #[from(ignore)]
    #[display("Invalid rule: {_0}")]
    InvalidRule(String),

    /// A patch file could not be parsed.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// A per-file task panicked before producing a result.
    #[from(ignore)]
    #[display("Task for {} aborted: {reason}", path.display())]
    TaskAborted {
        /// File the task was patching.
        path: PathBuf,
        /// Panic or join failure description.
        reason: String,
    },

    /// Aggregate failure of a run.
    #[from(ignore)]
    #[display("{failed} of {total} file(s) failed to patch")]
    RunFailed {
        /// Number of failed files.
        failed: usize,
        /// Number of files in the patch set.
        total: usize,
    },
}

/// Manual implementation of the standard Error trait.
///
/// Implemented by hand because several variants carry plain `String`s,
/// which would break a derived `source()`.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::FileNotFound { source, .. } => Some(source),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
