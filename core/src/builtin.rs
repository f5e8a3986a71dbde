//! # Built-in Patches
//!
//! The JUCE patch table applied when no patch file is given. Paths are
//! relative to the directory that contains the `JUCE/` checkout.

use crate::error::AppResult;
use crate::rule::{PatchRule, PatchSet};

/// Win32 windowing implementation of `juce_gui_basics`.
pub const WIN32_WINDOWING: &str = "JUCE/modules/juce_gui_basics/native/juce_win32_Windowing.cpp";

/// Anchor: the top-level window creation call in `HWNDComponentPeer`.
pub const CREATE_WINDOW_ANCHOR: &str = "hwnd = CreateWindowEx";

/// Creates a child popup of `parentToAddTo` when style flag bit 28 is set,
/// otherwise falls through to the stock `CreateWindowEx` call.
pub const CREATE_CHILD_WINDOW: &str = concat!(
    "hwnd = parentToAddTo != nullptr && (styleFlags & (1 << 28)) ? ",
    "CreateWindow(WindowClassHolder::getInstance()->getWindowClassName(), L\"\",",
    "WS_POPUP | WS_SYSMENU | WS_CAPTION | WS_MINIMIZEBOX | WS_MAXIMIZEBOX | WS_THICKFRAME",
    " | WS_CLIPCHILDREN | WS_CLIPSIBLINGS,",
    "0, 0, 0, 0, parentToAddTo, nullptr, ",
    "(HINSTANCE)Process::getCurrentModuleInstanceHandle(), nullptr) : CreateWindowEx"
);

/// Builds the built-in patch table.
pub fn builtin_patch_set() -> AppResult<PatchSet> {
    let mut set = PatchSet::new();
    set.push(
        WIN32_WINDOWING,
        PatchRule::new(CREATE_WINDOW_ANCHOR, CREATE_CHILD_WINDOW)?,
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::apply_rules;
    use crate::report::RuleStatus;
    use std::path::Path;

    #[test]
    fn test_builtin_table_is_valid() {
        let set = builtin_patch_set().unwrap();
        let rules = set.rules(Path::new(WIN32_WINDOWING)).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].replacement_text().ends_with(CREATE_WINDOW_ANCHOR));
    }

    #[test]
    fn test_builtin_rule_against_windowing_excerpt() {
        let excerpt = "        hwnd = CreateWindowEx (exstyle, WindowClassHolder::getInstance()->getWindowClassName(),\n";
        let set = builtin_patch_set().unwrap();
        let rules = set.rules(Path::new(WIN32_WINDOWING)).unwrap();

        let (patched, states) = apply_rules(Path::new(WIN32_WINDOWING), excerpt, rules).unwrap();
        assert_eq!(states, vec![RuleStatus::Applied]);
        assert!(patched.contains("(styleFlags & (1 << 28))"));
        assert!(patched.contains(": CreateWindowEx (exstyle,"));

        let (again, states) = apply_rules(Path::new(WIN32_WINDOWING), &patched, rules).unwrap();
        assert_eq!(states, vec![RuleStatus::AlreadyApplied]);
        assert_eq!(again, patched);
    }
}
