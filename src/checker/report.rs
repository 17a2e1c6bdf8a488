//! Report rendering
//!
//! Pure text assembly over a finished [`CheckResult`]; no I/O and no error
//! conditions.

use std::path::Path;
use time::{OffsetDateTime, format_description};

use super::types::CheckResult;

/// Render the final report document.
pub fn render(result: &CheckResult, base_dir: &Path) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Template File Missing Content Report".to_string());
    lines.push(String::new());
    lines.push(format!("Generated: {}", timestamp()));
    lines.push(String::new());
    lines.push(format!("Base directory: {}", base_dir.display()));
    lines.push(format!(
        "Template files found: {}",
        result.stats.templates_found
    ));
    lines.push(format!(
        "Parent files matched: {}",
        result.stats.parents_matched
    ));
    lines.push(format!(
        "Files with missing content: {}",
        result.stats.files_with_differences
    ));
    lines.push(String::new());

    if result.differences.is_empty() {
        lines.push("## Summary".to_string());
        lines.push(String::new());
        lines.push(
            "No missing content found in template files compared to their parent files."
                .to_string(),
        );
        return lines.join("\n");
    }

    lines.push("## Missing Content".to_string());
    lines.push(String::new());

    for record in &result.differences {
        lines.push(format!("### {}", record.template.display()));
        lines.push(format!("*Compared to: {}*", record.parent.display()));
        lines.push(String::new());
        lines.push("Missing lines that should be added to the template:".to_string());
        lines.push("```".to_string());
        for line in &record.missing_lines {
            lines.push(line.clone());
        }
        lines.push("```".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    match format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]") {
        Ok(format) => now.format(&format).unwrap_or_else(|_| now.to_string()),
        Err(_) => now.to_string(),
    }
}
