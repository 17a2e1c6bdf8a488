//! Template discovery patterns
//!
//! Inclusion globs classify the filename component of a walked path;
//! exclusion globs classify the forward-slash relative path. A path matching
//! both is excluded.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Filename globs that mark a file as a template candidate.
pub const TEMPLATE_PATTERNS: &[&str] = &[
    "*.template.*",
    "*.template",
    "*.env.template",
    "*/*.template.*",
    "*/*.template",
    "*/*.env.template",
];

/// Relative-path globs dropped from discovery regardless of inclusion.
///
/// This list is never mutated; per-run additions are concatenated onto a
/// fresh copy when the matcher is built.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/.git*/**",
    "**/.svn/**",
    "**/.hg/**",
    "**/node_modules/**",
    "**/target/**",
];

/// Compiled inclusion/exclusion classifier for walked paths.
#[derive(Debug)]
pub struct PatternMatcher {
    include: GlobSet,
    exclude: GlobSet,
}

impl PatternMatcher {
    /// Build a matcher from the fixed template patterns plus the default
    /// exclusions and any per-run additions.
    pub fn new(extra_excludes: &[String]) -> Result<Self> {
        let include_patterns: Vec<String> = TEMPLATE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .collect();
        let exclude_patterns: Vec<String> = DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .chain(extra_excludes.iter().cloned())
            .collect();

        Ok(Self {
            include: build_globset(&include_patterns)?,
            exclude: build_globset(&exclude_patterns)?,
        })
    }

    /// Whether a relative path qualifies as a template candidate.
    /// Exclusion dominates: an excluded path is never a candidate.
    pub fn is_candidate(&self, rel_path: &Path) -> bool {
        !self.is_excluded(rel_path) && self.matched_pattern(rel_path).is_some()
    }

    /// The first inclusion glob that fires for this path's filename, if any.
    pub fn matched_pattern(&self, rel_path: &Path) -> Option<&'static str> {
        let name = rel_path.file_name()?;
        let hits = self.include.matches(Path::new(name));
        hits.first().map(|&i| TEMPLATE_PATTERNS[i])
    }

    /// Whether any exclusion glob matches the posix form of the path.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        self.exclude.is_match(posix_path(rel_path))
    }
}

/// Exclusion matching is defined over forward-slash paths.
fn posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Create a GlobSet from a list of patterns for efficient batch matching
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_template_name_matching() {
        let matcher = PatternMatcher::new(&[]).unwrap();

        assert!(matcher.is_candidate(Path::new("app.template.json")));
        assert!(matcher.is_candidate(Path::new("config/settings.template")));
        assert!(matcher.is_candidate(Path::new(".env.template")));
        assert!(matcher.is_candidate(Path::new("deploy/prod.env.template")));

        assert!(!matcher.is_candidate(Path::new("app.json")));
        assert!(!matcher.is_candidate(Path::new("settings")));
        assert!(!matcher.is_candidate(Path::new("template"))); // no dot separator
    }

    #[test]
    fn test_matched_pattern_reports_which_glob_fired() {
        let matcher = PatternMatcher::new(&[]).unwrap();

        assert_eq!(
            matcher.matched_pattern(Path::new("app.template.json")),
            Some("*.template.*")
        );
        assert_eq!(
            matcher.matched_pattern(Path::new("settings.template")),
            Some("*.template")
        );
        assert_eq!(matcher.matched_pattern(Path::new("app.json")), None);
    }

    #[test]
    fn test_default_exclusions_cover_vcs_directories() {
        let matcher = PatternMatcher::new(&[]).unwrap();

        assert!(matcher.is_excluded(Path::new(".git/hooks/pre-commit.template")));
        assert!(matcher.is_excluded(Path::new("sub/.gitlab/ci.template.yml")));
        assert!(matcher.is_excluded(Path::new("node_modules/pkg/config.template.js")));
        assert!(!matcher.is_excluded(Path::new("src/config.template.js")));
    }

    #[test]
    fn test_exclusion_dominates_inclusion() {
        let matcher = PatternMatcher::new(&["**/legacy/**".to_string()]).unwrap();

        // Matches an inclusion pattern but sits under an excluded directory.
        let path = Path::new("legacy/app.template.json");
        assert!(matcher.matched_pattern(path).is_some());
        assert!(!matcher.is_candidate(path));
    }

    #[test]
    fn test_extra_exclusions_do_not_leak_between_matchers() {
        let first = PatternMatcher::new(&["**/only-first/**".to_string()]).unwrap();
        let second = PatternMatcher::new(&[]).unwrap();

        let path = Path::new("only-first/app.template.json");
        assert!(!first.is_candidate(path));
        assert!(second.is_candidate(path));
    }
}
