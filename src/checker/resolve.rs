//! Parent-file resolution
//!
//! Each template path runs through a fixed, ordered list of naming rules.
//! The first rule whose derived path exists wins the chain; the winner must
//! then be a regular file for a mapping to be created.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Outcome of deriving a parent path for one template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Derived path exists and is a regular file.
    Parent(PathBuf),
    /// Derived path exists but is not a regular file (e.g. a directory).
    NotAFile(PathBuf),
    /// No rule produced an existing path.
    Unmatched,
}

lazy_static! {
    /// Ordered (pattern, rewrite) rules, evaluated top to bottom.
    static ref PARENT_RULES: Vec<(Regex, &'static str)> = vec![
        // name.template.ext -> name.ext
        (Regex::new(r"^(.+)\.template(\..+)$").unwrap(), "${1}${2}"),
        // name.template -> name
        (Regex::new(r"^(.+)\.template$").unwrap(), "${1}"),
        // name.env.template -> name.env
        (Regex::new(r"^(.+)\.env\.template$").unwrap(), "${1}.env"),
    ];
}

/// Derive the parent file for `template`, a path relative to `base_dir`.
///
/// Resolution is a pure function of the path string plus existence checks;
/// it never depends on directory traversal order.
pub fn resolve_parent(base_dir: &Path, template: &Path) -> Resolution {
    let template_str = template.to_string_lossy();

    for (pattern, rewrite) in PARENT_RULES.iter() {
        if !pattern.is_match(&template_str) {
            continue;
        }

        let derived = PathBuf::from(pattern.replace(&template_str, *rewrite).into_owned());
        let full = base_dir.join(&derived);
        if !full.exists() {
            tracing::trace!(
                "rule {} derived nonexistent parent {}",
                pattern.as_str(),
                derived.display()
            );
            continue;
        }

        if full.is_file() {
            tracing::debug!(
                "resolved {} -> {}",
                template.display(),
                derived.display()
            );
            return Resolution::Parent(derived);
        }
        return Resolution::NotAFile(derived);
    }

    Resolution::Unmatched
}
