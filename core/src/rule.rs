//! # Patch Rules
//!
//! The data model: a literal substitution rule and the ordered per-file
//! table of rules applied in one run.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A single literal substitution.
///
/// The replacement normally extends the anchor (it contains `match_text`),
/// which is what lets a re-run recognise its own earlier application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RuleSpec")]
pub struct PatchRule {
    match_text: String,
    replacement_text: String,
}

/// Raw rule as written in a patch file, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleSpec {
    from: String,
    to: String,
}

impl TryFrom<RuleSpec> for PatchRule {
    type Error = AppError;

    fn try_from(spec: RuleSpec) -> AppResult<Self> {
        PatchRule::new(spec.from, spec.to)
    }
}

impl PatchRule {
    /// Builds a rule, rejecting empty texts and no-op substitutions.
    pub fn new(match_text: impl Into<String>, replacement_text: impl Into<String>) -> AppResult<Self> {
        let match_text = match_text.into();
        let replacement_text = replacement_text.into();

        if match_text.is_empty() {
            return Err(AppError::InvalidRule("anchor text is empty".into()));
        }
        if replacement_text.is_empty() {
            return Err(AppError::InvalidRule(format!(
                "replacement for anchor {:?} is empty",
                match_text
            )));
        }
        if match_text == replacement_text {
            return Err(AppError::InvalidRule(format!(
                "replacement is identical to anchor {:?}",
                match_text
            )));
        }

        Ok(Self {
            match_text,
            replacement_text,
        })
    }

    /// The anchor text searched for.
    pub fn match_text(&self) -> &str {
        &self.match_text
    }

    /// The text the anchor is replaced with.
    pub fn replacement_text(&self) -> &str {
        &self.replacement_text
    }
}

/// Ordered mapping of file path to the rules applied to it.
///
/// Files keep insertion order, which is also the report order. Rules for one
/// file run in sequence against the progressively updated content.
///
/// Keys are normalized lexically (`./a.cpp` and `a.cpp` are the same file),
/// so no two tasks of one run ever touch the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PatchFile")]
pub struct PatchSet {
    files: IndexMap<PathBuf, Vec<PatchRule>>,
}

impl PatchSet {
    /// Creates an empty patch set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule for `path`, creating the file entry on first use.
    ///
    /// Aliases of an existing path append to that entry.
    pub fn push(&mut self, path: impl Into<PathBuf>, rule: PatchRule) -> &mut Self {
        self.files
            .entry(normalize_path(&path.into()))
            .or_default()
            .push(rule);
        self
    }

    /// Builder-style variant of [`PatchSet::push`].
    pub fn with_rule(mut self, path: impl Into<PathBuf>, rule: PatchRule) -> Self {
        self.push(path, rule);
        self
    }

    /// Registers `path` with no rules. Such a file reports as unchanged.
    pub fn touch(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.files.entry(normalize_path(&path.into())).or_default();
        self
    }

    /// Rules registered for `path`, if any.
    pub fn rules(&self, path: &Path) -> Option<&[PatchRule]> {
        self.files.get(&normalize_path(path)).map(Vec::as_slice)
    }

    /// Iterates files in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[PatchRule])> {
        self.files.iter().map(|(p, r)| (p.as_path(), r.as_slice()))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no file is registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for PatchSet {
    type Item = (PathBuf, Vec<PatchRule>);
    type IntoIter = indexmap::map::IntoIter<PathBuf, Vec<PatchRule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// Drops `.` components and redundant separators. `..` is kept.
fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Top-level shape of a patch file.
#[derive(Debug, Deserialize)]
struct PatchFile {
    files: FileEntries,
}

/// File entries in document order, duplicates included.
#[derive(Debug)]
struct FileEntries(Vec<(PathBuf, Vec<PatchRule>)>);

impl<'de> Deserialize<'de> for FileEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = FileEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of file paths to rule lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<PathBuf, Vec<PatchRule>>()? {
                    entries.push(entry);
                }
                Ok(FileEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl TryFrom<PatchFile> for PatchSet {
    type Error = String;

    fn try_from(file: PatchFile) -> Result<Self, String> {
        let mut files = IndexMap::with_capacity(file.files.0.len());
        for (path, rules) in file.files.0 {
            let key = normalize_path(&path);
            if files.contains_key(&key) {
                return Err(format!("duplicate file entry: {}", path.display()));
            }
            files.insert(key, rules);
        }
        Ok(Self { files })
    }
}
