//! Substring-based ignore patterns.
//!
//! A path is ignored when its string form contains any pattern of the set.
//! The set is derived once per run from [`DEFAULT_IGNORE_PATTERNS`] plus user
//! additions and removals, and never changes afterwards.

use std::path::Path;

pub const PYTHON_IGNORE_PATTERNS: &[&str] = &[
    ".venv",
    "venv",
    "__pycache__",
    ".ruff_cache",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".eggs",
    "build",
    "dist",
    ".coverage",
    ".python-version",
    "poetry.lock",
    "_.egg-info",
];

pub const NODE_IGNORE_PATTERNS: &[&str] = &[
    "node_modules",
    ".next",
    ".nuxt",
    ".angular",
    "bower_components",
    "jspm_packages",
    "coverage",
    ".cache",
    "build",
    "dist",
    ".eslintcache",
    "yarn-error.log",
    "yarn.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    ".DS_Store",
];

pub const GIT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".gitmodules",
    ".gitattributes",
    ".gitkeep",
    ".git-rewrite",
];

pub const INTELLIJ_IGNORE_PATTERNS: &[&str] = &[".idea"];

/// The default groups, in the order they are merged.
pub const DEFAULT_IGNORE_PATTERNS: &[&[&str]] = &[
    PYTHON_IGNORE_PATTERNS,
    NODE_IGNORE_PATTERNS,
    GIT_IGNORE_PATTERNS,
    INTELLIJ_IGNORE_PATTERNS,
];

/// An ordered, duplicate-free list of ignore patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl IgnoreSet {
    /// Builds a set from `defaults`, then appends `additions` and drops every
    /// pattern listed in `removals`.
    ///
    /// Empty additions are discarded. Removing a pattern that is not present
    /// does nothing.
    pub fn build<D, A, R>(defaults: D, additions: A, removals: R) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut set = Self::empty();
        for pattern in defaults {
            set.insert(pattern.as_ref());
        }
        for pattern in additions {
            set.insert(pattern.as_ref());
        }
        for pattern in removals {
            set.remove(pattern.as_ref());
        }
        set
    }

    /// The built-in groups with the given additions and removals applied.
    pub fn with_defaults<A, R>(additions: A, removals: R) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self::build(
            DEFAULT_IGNORE_PATTERNS.iter().flat_map(|group| group.iter()),
            additions,
            removals,
        )
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    fn insert(&mut self, pattern: &str) {
        if !pattern.is_empty() && !self.contains(pattern) {
            self.patterns.push(pattern.to_string());
        }
    }

    fn remove(&mut self, pattern: &str) {
        self.patterns.retain(|p| p != pattern);
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Case-sensitive substring match against the path's string form.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::with_defaults(std::iter::empty::<&str>(), std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const NONE: [&str; 0] = [];

    #[test]
    fn defaults_are_deduplicated() {
        let set = IgnoreSet::default();
        assert_eq!(
            set.patterns().iter().filter(|p| p.as_str() == "build").count(),
            1
        );
        assert!(set.contains("node_modules"));
        assert!(set.contains(".idea"));
        assert!(set.contains(".git"));
    }

    #[test]
    fn additions_are_appended_in_order() {
        let set = IgnoreSet::build(["a"], ["b", "", "a", "c"], NONE);
        assert_eq!(set.patterns(), ["a", "b", "c"]);
    }

    #[test]
    fn removals_apply_after_additions() {
        let set = IgnoreSet::with_defaults(["secret"], ["secret", "build"]);
        assert!(!set.contains("secret"));
        assert!(!set.contains("build"));
        assert!(set.contains("dist"));
    }

    #[test]
    fn removing_an_absent_pattern_is_a_noop() {
        let before = IgnoreSet::default();
        let after = IgnoreSet::with_defaults(NONE, ["never-added"]);
        assert_eq!(before, after);
    }

    #[test]
    fn substring_matching() {
        let set = IgnoreSet::build(["node_modules", ".pyc"], NONE, NONE);
        assert!(set.is_ignored(Path::new("web/node_modules/x.js")));
        assert!(set.is_ignored(Path::new("pkg/mod.pyc")));
        assert!(set.is_ignored(Path::new("my_node_modules_backup")));
        assert!(!set.is_ignored(Path::new("src/main.rs")));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let set = IgnoreSet::build(["Build"], NONE, NONE);
        assert!(set.is_ignored(Path::new("Build/out")));
        assert!(!set.is_ignored(Path::new("build/out")));
    }

    #[test]
    fn ignored_iff_some_pattern_is_a_substring() {
        let patterns = ["dist", ".git", "lock"];
        let set = IgnoreSet::build(patterns, NONE, NONE);
        let paths = [
            "dist",
            "src/distance.rs",
            ".github/workflows/ci.yml",
            "Cargo.lock",
            "README.md",
            "docs/guide.md",
            "",
        ];
        for path in paths {
            let expected = patterns.iter().any(|p| path.contains(p));
            assert_eq!(set.is_ignored(&PathBuf::from(path)), expected, "{path}");
        }
    }

    #[test]
    fn empty_set_ignores_nothing() {
        let set = IgnoreSet::empty();
        assert!(set.is_empty());
        assert!(!set.is_ignored(Path::new("node_modules")));
    }
}
