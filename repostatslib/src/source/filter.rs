//! Path filtering with ignore rules and optional include globs.
//!
//! Ignore rules come in three flavours, chosen by their first character:
//!
//! - `.md` (leading dot): suffix match on the whole path
//! - `/build` (leading slash): folder match on `build`
//! - `node_modules` (anything else): exact name or path segment match
//!
//! Matching is case-sensitive and operates on the raw path string; no
//! separator or whitespace normalization is performed.

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::RepoStatsError;
use crate::Result;

/// Rules active before the user changes anything.
pub const DEFAULT_IGNORES: &[&str] = &["package-lock.json", "node_modules", ".git", "build", "dist"];

/// Catalogue of rules offered for toggling.
pub const COMMON_IGNORE_ITEMS: &[&str] = &[
    ".gitignore",
    ".git",
    "build",
    "dist",
    "coverage",
    ".env",
    ".DS_Store",
    ".idea",
    ".vscode",
    "package-lock.json",
    "/node_modules",
    "yarn.lock",
    "package.json",
    "tsconfig.json",
    "tsconfig.build.json",
    "tslint.json",
    ".build.gradle",
    ".gradlew",
    ".gradlew.bat",
    "/gradle",
    ".gradle.properties",
    ".gradle.lockfile",
    ".gradle-wrapper.jar",
    "/build",
    "/target",
    "/assets",
    "/public",
    "/images",
    ".ico",
    "fonts",
    "styles",
    ".lock",
    ".lockfile",
    ".toml",
    ".xml",
    ".png",
    ".svg",
    ".css",
    ".scss",
    ".less",
    ".iml",
    ".md",
    ".example",
];

/// Check whether a single ignore rule matches a path.
pub fn rule_matches(rule: &str, path: &str) -> bool {
    if rule.starts_with('.') {
        return path.ends_with(rule);
    }

    let name = rule.strip_prefix('/').unwrap_or(rule);
    segment_match(name, path)
}

/// `path` is `name`, lives under `name/`, or ends in `/name`.
fn segment_match(name: &str, path: &str) -> bool {
    if path == name {
        return true;
    }
    let under = path
        .strip_prefix(name)
        .is_some_and(|rest| rest.starts_with('/'));
    let tail = path
        .strip_suffix(name)
        .is_some_and(|head| head.ends_with('/'));
    under || tail
}

/// A path is included iff no rule matches it.
pub fn should_include<S: AsRef<str>>(path: &str, rules: &[S]) -> bool {
    !rules.iter().any(|rule| rule_matches(rule.as_ref(), path))
}

/// Ordered, de-duplicated set of ignore rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreList {
    rules: Vec<String>,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::from_rules(DEFAULT_IGNORES.iter().copied())
    }
}

impl IgnoreList {
    /// An empty list (nothing ignored).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build a list from rules, dropping duplicates.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::empty();
        for rule in rules {
            list.insert(rule);
        }
        list
    }

    /// Add a rule. Returns false if it was already present.
    pub fn insert(&mut self, rule: impl Into<String>) -> bool {
        let rule = rule.into();
        if self.contains(&rule) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Remove a rule. Returns false if it was not present.
    pub fn remove(&mut self, rule: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r != rule);
        self.rules.len() != before
    }

    /// Flip a rule on or off, like ticking a checkbox.
    /// Returns whether the rule is active afterwards.
    pub fn toggle(&mut self, rule: &str) -> bool {
        if self.remove(rule) {
            false
        } else {
            self.rules.push(rule.to_string());
            true
        }
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.rules.iter().any(|r| r == rule)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check a path against every rule.
    pub fn allows(&self, path: &str) -> bool {
        should_include(path, &self.rules)
    }
}

/// Configuration for path filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Ignore rules (a match excludes the path)
    pub ignore: IgnoreList,
    /// Glob patterns to include (if empty, include everything not ignored)
    pub include: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a filter with the default ignore rules and no include patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter that lets every path through.
    pub fn permissive() -> Self {
        Self {
            ignore: IgnoreList::empty(),
            include: Vec::new(),
        }
    }

    /// Replace the ignore list.
    pub fn ignore_list(mut self, ignore: IgnoreList) -> Self {
        self.ignore = ignore;
        self
    }

    /// Add an ignore rule.
    pub fn ignore(mut self, rule: &str) -> Self {
        self.ignore.insert(rule);
        self
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| RepoStatsError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.include.push(pat);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path passes the filter.
    ///
    /// A path passes if:
    /// 1. No ignore rule matches it
    /// 2. It matches at least one include pattern (or include is empty)
    pub fn matches(&self, path: &str) -> bool {
        if !self.ignore.allows(path) {
            return false;
        }

        if self.include.is_empty() {
            return true;
        }

        self.include.iter().any(|pattern| pattern.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_rule() {
        let rules = [".md"];

        assert!(!should_include("README.md", &rules));
        assert!(!should_include("docs/notes.md", &rules));
        assert!(should_include("README.md.bak", &rules));
        assert!(should_include("src/main.rs", &rules));
    }

    #[test]
    fn test_suffix_rule_is_whole_string() {
        // No extension boundary: `.css` matches any path ending in `.css`
        let rules = [".css"];

        assert!(!should_include("weirdcss.css", &rules));
        assert!(should_include("mycss", &rules));
        assert!(should_include("xcss", &rules));
    }

    #[test]
    fn test_folder_rule() {
        let rules = ["/build"];

        assert!(!should_include("build", &rules));
        assert!(!should_include("build/index.js", &rules));
        assert!(!should_include("app/build", &rules));
        assert!(should_include("builder/x", &rules));
        assert!(should_include("app/rebuild", &rules));
    }

    #[test]
    fn test_plain_rule() {
        let rules = ["node_modules"];

        assert!(!should_include("node_modules", &rules));
        assert!(!should_include("node_modules/x", &rules));
        assert!(!should_include("src/node_modules", &rules));
        assert!(should_include("node_modules_backup", &rules));
        assert!(should_include("my_node_modules", &rules));
    }

    #[test]
    fn test_plain_rule_matches_file_names() {
        let rules = ["package-lock.json"];

        assert!(!should_include("package-lock.json", &rules));
        assert!(!should_include("web/package-lock.json", &rules));
        assert!(should_include("package-lock.json.orig", &rules));
    }

    #[test]
    fn test_case_sensitive() {
        let rules = ["/Build", ".MD"];

        assert!(should_include("build/x.js", &rules));
        assert!(should_include("README.md", &rules));
        assert!(!should_include("Build/x.js", &rules));
    }

    #[test]
    fn test_no_rules_includes_everything() {
        let rules: [&str; 0] = [];
        assert!(should_include("anything/at/all", &rules));
        assert!(should_include("", &rules));
    }

    #[test]
    fn test_any_rule_excludes() {
        let rules = [".md", "/build", "dist"];

        assert!(!should_include("README.md", &rules));
        assert!(!should_include("build/a.js", &rules));
        assert!(!should_include("dist/bundle.js", &rules));
        assert!(should_include("src/app.js", &rules));
    }

    #[test]
    fn test_default_ignore_list() {
        let list = IgnoreList::default();

        assert_eq!(list.len(), 5);
        assert!(list.contains("node_modules"));
        assert!(!list.allows("node_modules/react/index.js"));
        assert!(!list.allows(".git"));
        assert!(list.allows("src/index.js"));
    }

    #[test]
    fn test_ignore_list_toggle() {
        let mut list = IgnoreList::empty();

        assert!(list.toggle(".md"));
        assert!(list.contains(".md"));
        assert!(!list.toggle(".md"));
        assert!(!list.contains(".md"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ignore_list_dedup() {
        let mut list = IgnoreList::from_rules([".md", ".md", "dist"]);
        assert_eq!(list.rules(), &[".md".to_string(), "dist".to_string()]);

        assert!(!list.insert("dist"));
        assert!(list.remove("dist"));
        assert!(!list.remove("dist"));
    }

    #[test]
    fn test_common_items_have_no_duplicates() {
        let list = IgnoreList::from_rules(COMMON_IGNORE_ITEMS.iter().copied());
        assert_eq!(list.len(), COMMON_IGNORE_ITEMS.len());
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::permissive().include("src/**").unwrap();

        assert!(filter.matches("src/main.rs"));
        assert!(filter.matches("src/a/b.js"));
        assert!(!filter.matches("docs/guide.md"));
    }

    #[test]
    fn test_filter_ignore_wins_over_include() {
        let filter = FilterConfig::permissive()
            .ignore(".md")
            .include_many(&["src/**", "docs/**"])
            .unwrap();

        assert!(filter.matches("docs/diagram.svg"));
        assert!(!filter.matches("docs/guide.md"));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        assert!(result.is_err());
        if let Err(RepoStatsError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
