use std::fmt;
use std::path::PathBuf;

/// A discovered template file paired with its resolved parent file.
/// Both paths are relative to the base directory of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePair {
    pub template: PathBuf,
    pub parent: PathBuf,
}

/// Parent-file lines judged structurally missing from one template.
///
/// Lines carry their original right-trimmed text, not the normalized form,
/// so the maintainer sees the real content to port over.
#[derive(Debug, Clone)]
pub struct DifferenceRecord {
    pub template: PathBuf,
    pub parent: PathBuf,
    pub missing_lines: Vec<String>,
}

/// Non-fatal conditions collected during a run.
///
/// None of these abort the analysis; a bad file never blocks the rest of
/// the tree.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    /// No naming rule produced an existing parent file for this template.
    UnmatchedTemplate { template: PathBuf },
    /// A naming rule derived a path that exists but is not a regular file.
    InvalidParentPath { template: PathBuf, parent: PathBuf },
    /// A matched pair could not be compared because a file was unreadable.
    ReadFailure {
        template: PathBuf,
        parent: PathBuf,
        cause: String,
    },
    /// The directory walk reported an error for an entry.
    WalkError { message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmatchedTemplate { template } => {
                write!(f, "No parent file found for {}", template.display())
            }
            Diagnostic::InvalidParentPath { template, parent } => {
                write!(
                    f,
                    "Parent path '{}' for {} is not a file",
                    parent.display(),
                    template.display()
                )
            }
            Diagnostic::ReadFailure {
                template,
                parent,
                cause,
            } => {
                write!(
                    f,
                    "Failed to compare '{}' and '{}': {}",
                    template.display(),
                    parent.display(),
                    cause
                )
            }
            Diagnostic::WalkError { message } => write!(f, "Walk error: {}", message),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckStats {
    pub templates_found: usize,
    pub parents_matched: usize,
    pub files_with_differences: usize,
    pub check_duration_ms: u64,
}

/// Complete outcome of one analysis run. Owned by the run; nothing here is
/// shared across runs.
#[derive(Debug)]
pub struct CheckResult {
    pub pairs: Vec<TemplatePair>,
    pub differences: Vec<DifferenceRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: CheckStats,
}
