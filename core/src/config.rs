//! # Patch Files
//!
//! Loads a [`PatchSet`] from YAML:
//!
//! ```yaml
//! files:
//!   JUCE/modules/juce_gui_basics/native/juce_win32_Windowing.cpp:
//!     - from: "hwnd = CreateWindowEx"
//!       to: "hwnd = Child() ? ... : CreateWindowEx"
//! ```

use crate::error::{AppError, AppResult};
use crate::rule::PatchSet;
use std::fs;
use std::path::Path;

/// Parses a patch set from YAML text.
pub fn parse_patch_set(yaml: &str) -> AppResult<PatchSet> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Reads and parses a patch file.
pub fn load_patch_set(path: &Path) -> AppResult<PatchSet> {
    let yaml = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!(
            "Failed to read patch file {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_patch_set(&yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_preserves_order() {
        let yaml = r#"
files:
  z.cpp:
    - from: "a"
      to: "ab"
    - from: "c"
      to: "cd"
  a.cpp:
    - from: "x"
      to: "xy"
  empty.cpp: []
"#;
        let set = parse_patch_set(yaml).unwrap();
        let files: Vec<_> = set.iter().map(|(p, r)| (p.to_owned(), r.len())).collect();
        assert_eq!(
            files,
            vec![
                (PathBuf::from("z.cpp"), 2),
                (PathBuf::from("a.cpp"), 1),
                (PathBuf::from("empty.cpp"), 0)
            ]
        );
        assert_eq!(set.rules(Path::new("z.cpp")).unwrap()[1].replacement_text(), "cd");
    }

    #[test]
    fn test_parse_rejects_invalid_rule() {
        let yaml = "files:\n  a.cpp:\n    - from: \"\"\n      to: \"x\"\n";
        let err = parse_patch_set(yaml).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("anchor text is empty"));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let yaml = "files:\n  a.cpp:\n    - from: \"a\"\n      to: \"ab\"\n      regex: true\n";
        assert!(parse_patch_set(yaml).is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_file_entry() {
        let yaml = r#"
files:
  a.cpp:
    - from: "a"
      to: "ab"
  a.cpp:
    - from: "c"
      to: "cd"
"#;
        let err = parse_patch_set(yaml).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("duplicate file entry: a.cpp"));
    }

    #[test]
    fn test_parse_rejects_aliased_file_entry() {
        let yaml = r#"
files:
  src/a.cpp:
    - from: "a"
      to: "ab"
  ./src/a.cpp:
    - from: "c"
      to: "cd"
"#;
        let err = parse_patch_set(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate file entry: ./src/a.cpp"));
    }

    #[test]
    fn test_parse_normalizes_keys() {
        let yaml = "files:\n  ./a.cpp:\n    - from: \"a\"\n      to: \"ab\"\n";
        let set = parse_patch_set(yaml).unwrap();
        let paths: Vec<_> = set.iter().map(|(p, _)| p.to_owned()).collect();
        assert_eq!(paths, vec![PathBuf::from("a.cpp")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = load_patch_set(&path).unwrap_err();
        assert!(err
            .to_string()
            .starts_with(&format!("Config Error: Failed to read patch file {}:", path.display())));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patches.yaml");
        fs::write(&path, "files:\n  a.cpp:\n    - from: \"a\"\n      to: \"ab\"\n").unwrap();
        let set = load_patch_set(&path).unwrap();
        assert_eq!(set.len(), 1);
    }
}
