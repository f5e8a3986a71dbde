#![deny(missing_docs)]

//! # srcpatch Core
//!
//! Idempotent literal text patching for vendored source trees.

/// Shared error types.
pub mod error;

/// Patch rules and patch sets.
pub mod rule;

/// File read/write capabilities.
pub mod store;

/// Run outcomes.
pub mod report;

/// Rule application and the per-file scatter/gather.
pub mod applier;

/// The built-in JUCE patch table.
pub mod builtin;

/// YAML patch files.
pub mod config;

pub use applier::{apply_patch_set, apply_rule, apply_rules, patch_file, ApplyOptions};
pub use builtin::builtin_patch_set;
pub use config::{load_patch_set, parse_patch_set};
pub use error::{AppError, AppResult};
pub use report::{FileReport, FileStatus, RuleStatus, RunReport};
pub use rule::{PatchRule, PatchSet};
pub use store::{DiskStore, FileStore, MemoryStore};
