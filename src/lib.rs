//! # tplcheck - Keep configuration templates honest
//!
//! tplcheck locates template variants of configuration files in a project
//! tree (`*.template.*`, `*.template`, `*.env.template`), pairs each with
//! the concrete file it tracks, and reports structural lines the template
//! is missing. Concrete values and secrets are normalized into placeholders
//! before comparison, so templates stay in sync without ever carrying real
//! credentials.
//!
//! ## Quick Start
//!
//! ```bash
//! # Scan the current project
//! tplcheck
//!
//! # Scan another tree and save the report
//! tplcheck --dir /path/to/project --output reports/
//! ```

pub mod checker;
pub mod cli;

pub use checker::{CheckResult, CheckerOptions, TemplateChecker};
pub use cli::{Cli, Output};

/// Result type alias for tplcheck operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
