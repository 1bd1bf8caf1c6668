//! Section-name → category mapping for grouped-style changelogs.
//!
//! Built-in defaults cover the section names conventional-commit changelog
//! generators emit; user overrides from
//! [`ChangelogConfig::grouped_section_map`](crate::config::ChangelogConfig)
//! win over the defaults. All lookups are case-insensitive.

use std::collections::HashMap;

use crate::model::Category;

/// Built-in raw-section-name → category defaults, lowercased keys.
///
/// `None` means "recognized but unclassified": the section contributes
/// entries but no bump signal.
const DEFAULT_SECTION_MAP: &[(&str, Option<Category>)] = &[
    ("breaking changes", Some(Category::Removed)),
    ("features", Some(Category::Added)),
    ("enhancements", Some(Category::Added)),
    ("bug fixes", Some(Category::Fixed)),
    ("fixes", Some(Category::Fixed)),
    ("performance", Some(Category::Changed)),
    ("refactors", Some(Category::Changed)),
    ("documentation", None),
    ("styling", None),
    ("tests", None),
    ("chores", None),
    ("ci", None),
    ("build", None),
    ("reverts", Some(Category::Removed)),
    ("other", None),
];

/// Maps raw section headings to canonical categories.
///
/// Constructed once per parse run; immutable afterwards.
#[derive(Debug, Clone)]
pub struct SectionMapper {
    map: HashMap<String, Option<Category>>,
}

impl SectionMapper {
    /// Build a mapper from the defaults overlaid with user overrides.
    ///
    /// Override keys are lowercased before insertion so user entries shadow
    /// the built-ins regardless of casing. Override values are parsed as
    /// canonical category names; an empty or unrecognized value maps the
    /// section to "unclassified", keeping the category set closed.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut map: HashMap<String, Option<Category>> = DEFAULT_SECTION_MAP
            .iter()
            .map(|(name, cat)| ((*name).to_string(), *cat))
            .collect();

        for (name, value) in overrides {
            map.insert(name.to_lowercase(), Category::from_section_name(value));
        }

        Self { map }
    }

    /// Look up the category for a raw section name (already icon-stripped).
    ///
    /// Returns `None` both for sections mapped to "unclassified" and for
    /// names the mapper has never heard of; callers cannot tell the two
    /// apart, and do not need to.
    pub fn category(&self, section: &str) -> Option<Category> {
        self.map
            .get(&section.to_lowercase())
            .copied()
            .flatten()
    }
}

impl Default for SectionMapper {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}

/// Remove a leading icon token from a section name.
///
/// Handles both `:sparkles:`-style emoji codes and literal leading
/// non-alphanumeric runs (actual emoji, arrows, and the like). A name with
/// no alphanumeric characters at all is returned unchanged.
pub fn strip_section_icon(s: &str) -> &str {
    let mut s = s.trim();

    // GitHub-style emoji codes like :sparkles:
    if let Some(rest) = s.strip_prefix(':')
        && let Some(idx) = rest.find(':')
        && idx > 0
    {
        s = s[idx + 2..].trim();
    }

    if s.is_empty() {
        return s;
    }

    match s.char_indices().find(|(_, c)| c.is_alphanumeric()) {
        Some((start, _)) => s[start..].trim(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_covers_common_sections() {
        let mapper = SectionMapper::default();
        assert_eq!(mapper.category("Features"), Some(Category::Added));
        assert_eq!(mapper.category("Bug Fixes"), Some(Category::Fixed));
        assert_eq!(mapper.category("Breaking Changes"), Some(Category::Removed));
        assert_eq!(mapper.category("Performance"), Some(Category::Changed));
        assert_eq!(mapper.category("Reverts"), Some(Category::Removed));
        assert_eq!(mapper.category("Documentation"), None);
        assert_eq!(mapper.category("Chores"), None);
    }

    #[test]
    fn unknown_section_is_unclassified() {
        let mapper = SectionMapper::default();
        assert_eq!(mapper.category("Miscellany"), None);
    }

    #[test]
    fn overrides_win_case_insensitively() {
        let mut overrides = HashMap::new();
        overrides.insert("FEATURES".to_string(), "Changed".to_string());
        overrides.insert("Deprecations".to_string(), "Deprecated".to_string());

        let mapper = SectionMapper::with_overrides(&overrides);
        assert_eq!(mapper.category("features"), Some(Category::Changed));
        assert_eq!(mapper.category("deprecations"), Some(Category::Deprecated));
    }

    #[test]
    fn override_with_empty_value_unclassifies() {
        let mut overrides = HashMap::new();
        overrides.insert("Fixes".to_string(), String::new());

        let mapper = SectionMapper::with_overrides(&overrides);
        assert_eq!(mapper.category("Fixes"), None);
    }

    #[test]
    fn override_with_garbage_value_unclassifies() {
        let mut overrides = HashMap::new();
        overrides.insert("Fixes".to_string(), "Catastrophic".to_string());

        let mapper = SectionMapper::with_overrides(&overrides);
        assert_eq!(mapper.category("Fixes"), None);
    }

    #[test]
    fn strips_emoji_code_icon() {
        assert_eq!(strip_section_icon(":sparkles: Features"), "Features");
        assert_eq!(strip_section_icon(":bug: Bug Fixes"), "Bug Fixes");
    }

    #[test]
    fn strips_literal_icon_run() {
        assert_eq!(strip_section_icon("🚀 Features"), "Features");
        assert_eq!(strip_section_icon("⚠️→ Breaking Changes"), "Breaking Changes");
    }

    #[test]
    fn plain_name_passes_through() {
        assert_eq!(strip_section_icon("Features"), "Features");
        assert_eq!(strip_section_icon("  Features  "), "Features");
    }

    #[test]
    fn no_alphanumeric_returns_input() {
        assert_eq!(strip_section_icon("***"), "***");
    }
}
