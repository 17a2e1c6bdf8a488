//! Template drift checking pipeline
//!
//! Discovery walks the base directory and classifies paths against the
//! template patterns; resolution pairs each template with the concrete file
//! it tracks; diffing reports parent lines whose normalized form the
//! template lacks. Every stage is best-effort: a bad file becomes a
//! diagnostic, never an abort.

pub mod diff;
pub mod normalize;
pub mod patterns;
pub mod report;
pub mod resolve;
pub mod types;

pub use patterns::PatternMatcher;
pub use resolve::Resolution;
pub use types::{CheckResult, CheckStats, Diagnostic, DifferenceRecord, TemplatePair};

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::PathBuf;
use std::time::Instant;

/// Per-run configuration consumed from the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct CheckerOptions {
    /// Root of the tree to scan.
    pub base_dir: PathBuf,
    /// Exclusion globs appended to the defaults for this run only.
    pub extra_excludes: Vec<String>,
}

/// One-shot analysis over a single directory tree.
pub struct TemplateChecker {
    base_dir: PathBuf,
    matcher: PatternMatcher,
}

impl TemplateChecker {
    pub fn new(options: &CheckerOptions) -> Result<Self> {
        Ok(Self {
            base_dir: options.base_dir.clone(),
            matcher: PatternMatcher::new(&options.extra_excludes)?,
        })
    }

    /// Run the full discover -> resolve -> diff pipeline.
    pub fn run(&self) -> CheckResult {
        let start_time = Instant::now();
        let mut diagnostics = Vec::new();

        let templates = self.find_template_files(&mut diagnostics);
        let pairs = self.resolve_parents(&templates, &mut diagnostics);
        let differences = self.compare_pairs(&pairs, &mut diagnostics);

        let stats = CheckStats {
            templates_found: templates.len(),
            parents_matched: pairs.len(),
            files_with_differences: differences.len(),
            check_duration_ms: start_time.elapsed().as_millis() as u64,
        };

        CheckResult {
            pairs,
            differences,
            diagnostics,
            stats,
        }
    }

    /// Walk the base directory and collect relative paths of template
    /// candidates. Results are sorted so nothing downstream depends on
    /// traversal order.
    fn find_template_files(&self, diagnostics: &mut Vec<Diagnostic>) -> Vec<PathBuf> {
        let mut templates = Vec::new();

        // Standard filters stay off: hidden files like `.env.template` are
        // first-class here, and only the run's own exclusion globs decide
        // what gets skipped.
        let walker = WalkBuilder::new(&self.base_dir)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                        continue;
                    }
                    let Ok(rel_path) = entry.path().strip_prefix(&self.base_dir) else {
                        continue;
                    };
                    if self.matcher.is_excluded(rel_path) {
                        if self.matcher.matched_pattern(rel_path).is_some() {
                            tracing::debug!("excluding file: {}", rel_path.display());
                        }
                        continue;
                    }
                    if let Some(pattern) = self.matcher.matched_pattern(rel_path) {
                        tracing::debug!(
                            "found template file: {} (pattern '{}')",
                            rel_path.display(),
                            pattern
                        );
                        templates.push(rel_path.to_path_buf());
                    }
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::WalkError {
                        message: e.to_string(),
                    });
                }
            }
        }

        templates.sort();
        templates
    }

    /// Pair each template with its parent file. Templates without a valid
    /// parent become diagnostics and drop out of the analysis.
    fn resolve_parents(
        &self,
        templates: &[PathBuf],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<TemplatePair> {
        let mut pairs = Vec::new();

        for template in templates {
            match resolve::resolve_parent(&self.base_dir, template) {
                Resolution::Parent(parent) => {
                    pairs.push(TemplatePair {
                        template: template.clone(),
                        parent,
                    });
                }
                Resolution::NotAFile(parent) => {
                    diagnostics.push(Diagnostic::InvalidParentPath {
                        template: template.clone(),
                        parent,
                    });
                }
                Resolution::Unmatched => {
                    diagnostics.push(Diagnostic::UnmatchedTemplate {
                        template: template.clone(),
                    });
                }
            }
        }

        pairs
    }

    /// Diff every matched pair. An unreadable pair contributes zero
    /// differences and a diagnostic with the underlying cause.
    fn compare_pairs(
        &self,
        pairs: &[TemplatePair],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<DifferenceRecord> {
        let mut differences = Vec::new();

        for pair in pairs {
            let template_path = self.base_dir.join(&pair.template);
            let parent_path = self.base_dir.join(&pair.parent);

            match diff::missing_lines(&template_path, &parent_path) {
                Ok(missing) if missing.is_empty() => {
                    tracing::debug!("no missing lines in {}", pair.template.display());
                }
                Ok(missing) => {
                    tracing::debug!(
                        "{} missing line(s) in {}",
                        missing.len(),
                        pair.template.display()
                    );
                    differences.push(DifferenceRecord {
                        template: pair.template.clone(),
                        parent: pair.parent.clone(),
                        missing_lines: missing,
                    });
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::ReadFailure {
                        template: pair.template.clone(),
                        parent: pair.parent.clone(),
                        cause: format!("{e:#}"),
                    });
                }
            }
        }

        differences
    }
}
