//! Command-line interface for tplcheck
//!
//! Thin glue around the checker core: argument parsing, logging setup,
//! console narration and report persistence.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use time::{OffsetDateTime, format_description};

mod output;

pub use output::Output;

use crate::checker::{CheckerOptions, TemplateChecker, report};

/// Check template configuration files against the real files they track
#[derive(Parser)]
#[command(
    name = "tplcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check template configuration files against the real files they track",
    long_about = "tplcheck finds template files in a project tree, pairs each with its \
                  parent configuration file, and reports structural lines the template \
                  is missing. Values and secrets are normalized away first, so only \
                  shape drift is flagged."
)]
pub struct Cli {
    /// Directory to search for template files
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Additional glob patterns to exclude (can be repeated)
    #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Write the report to PATH instead of stdout; an existing directory
    /// gets a timestamped file name inside it
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let out = Output::new(self.verbose > 0, self.quiet);

        let options = CheckerOptions {
            base_dir: self.dir.clone(),
            extra_excludes: self.exclude.clone(),
        };
        let checker = TemplateChecker::new(&options)?;

        out.step(&format!(
            "Searching for template files in {}",
            self.dir.display()
        ));
        let result = checker.run();

        for pair in &result.pairs {
            out.verbose(&format!(
                "Matched: {} -> {}",
                pair.template.display(),
                pair.parent.display()
            ));
        }
        for diagnostic in &result.diagnostics {
            out.warning(&diagnostic.to_string());
        }

        out.count("Template files found:", result.stats.templates_found);
        out.count("Parent files matched:", result.stats.parents_matched);
        out.count(
            "Files with missing content:",
            result.stats.files_with_differences,
        );

        let report = report::render(&result, &self.dir);
        match &self.output {
            Some(path) => {
                let path = resolve_output_path(path);
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).with_context(|| {
                            format!("failed to create report directory {}", parent.display())
                        })?;
                    }
                }
                fs::write(&path, &report)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                out.success(&format!("Report saved to {}", path.display()));
            }
            None => {
                out.blank_line();
                println!("{report}");
            }
        }

        Ok(())
    }
}

/// An existing directory gets a timestamped report file name inside it;
/// anything else is taken as the file path verbatim.
fn resolve_output_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(format!("template_report_{}.md", file_timestamp()))
    } else {
        path.to_path_buf()
    }
}

fn file_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    match format_description::parse("[year][month][day]_[hour][minute][second]") {
        Ok(format) => now
            .format(&format)
            .unwrap_or_else(|_| now.unix_timestamp().to_string()),
        Err(_) => now.unix_timestamp().to_string(),
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // Suppress debug noise from the walker and glob crates until -vvv
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
