//! Structural comparison between a template and its parent
//!
//! Comparison is set membership over normalized lines, not a positional
//! diff: reordering keys between the two files produces no differences.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use super::normalize::{is_comparable, normalize_line};

/// Read a file as lines, decoding UTF-8 with replacement of invalid bytes.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.lines().map(str::to_string).collect())
}

/// Parent lines whose normalized form has no counterpart anywhere in the
/// template.
///
/// Flagged lines are returned as their original right-trimmed text so the
/// real value is available for maintainer action. Comment and blank lines
/// are dropped from both sides before comparison. An empty result is the
/// expected outcome for a template that fully covers its parent.
pub fn missing_lines(template_path: &Path, parent_path: &Path) -> Result<Vec<String>> {
    let template_lines = read_lines(template_path)?;
    let parent_lines = read_lines(parent_path)?;

    let template_set: HashSet<String> = template_lines
        .iter()
        .filter(|line| is_comparable(line))
        .map(|line| normalize_line(line))
        .collect();

    let mut missing = Vec::new();
    for line in &parent_lines {
        if !is_comparable(line) {
            continue;
        }
        if !template_set.contains(&normalize_line(line)) {
            missing.push(line.trim_end().to_string());
        }
    }

    Ok(missing)
}
