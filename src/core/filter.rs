//! Filter specifications and the glob matching built from them.
//!
//! A dialog carries an ordered list of named filters parsed from the
//! `Label|pat1;pat2|Label2|pat3` grammar. At any time either one of those
//! entries is active, or the user has typed an ad hoc wildcard string that
//! overrides it until cleared. [`FilterMode`] makes that choice explicit.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;

/// A named group of glob patterns, e.g. `Images` → `*.png;*.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    pub label: String,
    pub patterns: Vec<String>,
}

/// The ordered filters offered by a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub entries: Vec<FilterEntry>,
}

impl FilterSpec {
    /// Parses `Label1|pat1;pat2|Label2|pat3`. Pairs are read left to right; a
    /// trailing label without patterns is ignored.
    pub fn parse(spec: &str) -> Self {
        if spec.trim().is_empty() {
            return Self::default();
        }
        let parts: Vec<&str> = spec.split('|').collect();
        let entries = parts
            .chunks_exact(2)
            .map(|pair| FilterEntry {
                label: pair[0].to_string(),
                patterns: pair[1]
                    .split(';')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }
}

/// Which filter currently restricts the listed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterMode {
    /// Index into [`FilterSpec::entries`].
    Active(usize),
    /// A wildcard string typed by the user.
    Custom(String),
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::Active(0)
    }
}

impl FilterMode {
    pub fn custom(&self) -> Option<&str> {
        match self {
            Self::Custom(text) => Some(text),
            Self::Active(_) => None,
        }
    }

    /// The glob patterns to apply to file names under this mode.
    ///
    /// With no filters configured (or an out-of-range index) every file matches.
    pub fn patterns(&self, spec: &FilterSpec) -> Vec<String> {
        match self {
            Self::Custom(text) => vec![complete_custom_pattern(text)],
            Self::Active(index) => match spec.entries.get(*index) {
                Some(entry) if !entry.patterns.is_empty() => entry.patterns.clone(),
                _ => vec!["*".to_string()],
            },
        }
    }
}

/// Completes a typed wildcard string so partial names match by prefix.
///
/// Patterns ending in a wildcard (`*` or `?`) or in a literal extension
/// (`*.txt`) are kept. A trailing `.` means "exactly this name" and is
/// dropped. Anything else gets a trailing `*`.
pub fn complete_custom_pattern(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['*', '?']) {
        return text.to_string();
    }
    if let Some(exact) = text.strip_suffix('.') {
        return exact.to_string();
    }
    let has_literal_extension = text
        .rsplit_once('.')
        .is_some_and(|(_, ext)| !ext.is_empty() && !ext.contains(['*', '?']));
    if has_literal_extension {
        text.to_string()
    } else {
        format!("{text}*")
    }
}

/// Builds a case-insensitive matcher over file names from a set of patterns.
/// Invalid patterns are skipped with a warning; duplicates collapse naturally
/// because each name is tested once against the whole set.
pub fn build_name_matcher(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
        {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => tracing::warn!("Skipping invalid filter pattern {:?}: {}", pattern, e),
        }
    }

    builder.build().unwrap_or_else(|e| {
        tracing::error!("Failed to build glob set from patterns: {}", e);
        GlobSet::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_left_to_right() {
        let spec = FilterSpec::parse("Text files|*.txt;*.md|Images|*.png;*.jpg|All|*");
        assert_eq!(spec.labels(), vec!["Text files", "Images", "All"]);
        assert_eq!(spec.entries[0].patterns, vec!["*.txt", "*.md"]);
        assert_eq!(spec.entries[1].patterns, vec!["*.png", "*.jpg"]);
        assert_eq!(spec.entries[2].patterns, vec!["*"]);
    }

    #[test]
    fn test_parse_ignores_malformed_trailing_fragment() {
        let spec = FilterSpec::parse("Rust|*.rs|Dangling");
        assert_eq!(spec.entries.len(), 1);
        assert_eq!(spec.entries[0].label, "Rust");

        assert!(FilterSpec::parse("").is_empty());
        assert!(FilterSpec::parse("OnlyLabel").is_empty());
    }

    #[test]
    fn test_active_mode_without_filters_matches_everything() {
        let spec = FilterSpec::default();
        assert_eq!(FilterMode::Active(0).patterns(&spec), vec!["*"]);
        let spec = FilterSpec::parse("Rust|*.rs");
        assert_eq!(FilterMode::Active(7).patterns(&spec), vec!["*"]);
        assert_eq!(FilterMode::Active(0).patterns(&spec), vec!["*.rs"]);
    }

    #[test]
    fn test_custom_pattern_completion() {
        assert_eq!(complete_custom_pattern("rep"), "rep*");
        assert_eq!(complete_custom_pattern("rep*"), "rep*");
        assert_eq!(complete_custom_pattern("*.txt"), "*.txt");
        assert_eq!(complete_custom_pattern("a?"), "a?");
        assert_eq!(complete_custom_pattern("rep?rt?"), "rep?rt?");
        assert_eq!(complete_custom_pattern("*.t?t"), "*.t?t*");
        assert_eq!(complete_custom_pattern("report."), "report");
    }

    #[test]
    fn test_trailing_question_mark_matches_one_character() {
        let patterns = FilterMode::Custom("a?".to_string()).patterns(&FilterSpec::default());
        let matcher = build_name_matcher(&patterns);
        assert!(matcher.is_match("ab"));
        assert!(!matcher.is_match("abc.txt"));
    }

    #[test]
    fn test_custom_mode_overrides_active_entry() {
        let spec = FilterSpec::parse("Rust|*.rs");
        let mode = FilterMode::Custom("ma".to_string());
        assert_eq!(mode.patterns(&spec), vec!["ma*"]);
        assert_eq!(mode.custom(), Some("ma"));
        assert_eq!(FilterMode::Active(0).custom(), None);
    }

    #[test]
    fn test_name_matcher_is_case_insensitive_union() {
        let matcher = build_name_matcher(&["*.txt".to_string(), "*.md".to_string()]);
        assert!(matcher.is_match("notes.TXT"));
        assert!(matcher.is_match("README.md"));
        assert!(!matcher.is_match("main.rs"));
    }

    #[test]
    fn test_name_matcher_skips_invalid_patterns() {
        let matcher = build_name_matcher(&["[".to_string(), "*.rs".to_string()]);
        assert!(matcher.is_match("lib.rs"));
        assert!(!matcher.is_match("["));
    }
}
