//! Line normalization
//!
//! Rewrites a line into a canonical form that keeps its structure (keys,
//! punctuation) while erasing concrete values, so two lines compare equal
//! exactly when they are structurally equivalent.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Environment assignments: KEY=anything
    static ref ENV_ASSIGNMENT: Regex = Regex::new(r"^([A-Z0-9_]+)=.*$").unwrap();

    // Secret-kind suffixes. These run after the generic assignment rule and
    // rewrite its placeholder, so the kind-specific marker is what survives.
    static ref SECRET_SUFFIX_RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"^(.*_SECRET=).*$").unwrap(), "${1}<SECRET>"),
        (Regex::new(r"^(.*_KEY=).*$").unwrap(), "${1}<KEY>"),
        (Regex::new(r"^(.*_TOKEN=).*$").unwrap(), "${1}<TOKEN>"),
        (Regex::new(r"^(.*_PASSWORD=).*$").unwrap(), "${1}<PASSWORD>"),
    ];

    // "key": "value" and key: "value" mappings
    static ref QUOTED_MAPPING: Regex =
        Regex::new(r#"^("?[a-zA-Z0-9_]+"?\s*:\s*)"[^"]*""#).unwrap();

    // key: 123 mappings
    static ref NUMERIC_MAPPING: Regex =
        Regex::new(r#"^("?[a-zA-Z0-9_]+"?\s*:\s*)\d+"#).unwrap();

    // - "KEY=value" compose-style list entries
    static ref LIST_ASSIGNMENT: Regex = Regex::new(r#"^(-\s*"[^"]*=)[^"]*"$"#).unwrap();
}

/// Whether a line belongs to the comparison corpus at all.
///
/// Blank lines and `#` comments are invisible to the diff on both sides --
/// they never satisfy a match and never create a missing-line flag.
pub fn is_comparable(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Normalize one raw line by replacing variable content with placeholders.
///
/// The substitutions are applied in sequence, each to the output of the
/// previous one. Idempotent: normalizing an already-normalized line yields
/// the same line.
pub fn normalize_line(line: &str) -> String {
    let mut line = line.trim().to_string();

    line = ENV_ASSIGNMENT.replace(&line, "${1}=<VALUE>").into_owned();

    for (pattern, rewrite) in SECRET_SUFFIX_RULES.iter() {
        line = pattern.replace(&line, *rewrite).into_owned();
    }

    line = QUOTED_MAPPING.replace(&line, "${1}\"<VALUE>\"").into_owned();
    line = NUMERIC_MAPPING.replace(&line, "${1}<NUMBER>").into_owned();
    line = LIST_ASSIGNMENT.replace(&line, "${1}<VALUE>\"").into_owned();

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_assignment_keeps_key_erases_value() {
        assert_eq!(normalize_line("PORT=8080"), "PORT=<VALUE>");
        assert_eq!(normalize_line("  DB_HOST=localhost  "), "DB_HOST=<VALUE>");
        assert_eq!(normalize_line("FLAG_2=true"), "FLAG_2=<VALUE>");
        // Lowercase keys are not environment assignments.
        assert_eq!(normalize_line("db_host=localhost"), "db_host=localhost");
    }

    // Every suffix kind, verifying the specific placeholder survives the
    // generic KEY=<VALUE> substitution that fires first.
    #[test]
    fn test_secret_suffix_matrix() {
        assert_eq!(normalize_line("APP_SECRET=abc123"), "APP_SECRET=<SECRET>");
        assert_eq!(normalize_line("API_KEY=abc123"), "API_KEY=<KEY>");
        assert_eq!(normalize_line("AUTH_TOKEN=abc123"), "AUTH_TOKEN=<TOKEN>");
        assert_eq!(
            normalize_line("DB_PASSWORD=s3cr3t"),
            "DB_PASSWORD=<PASSWORD>"
        );
    }

    #[test]
    fn test_secret_suffix_applies_to_non_env_keys_too() {
        // Mixed-case keys skip the env rule but still hit the suffix rules.
        assert_eq!(normalize_line("my_api_KEY=xyz"), "my_api_KEY=<KEY>");
        // The suffix comparison is case-sensitive.
        assert_eq!(normalize_line("api_key=xyz"), "api_key=xyz");
    }

    #[test]
    fn test_competing_suffixes_resolve_by_literal_match() {
        // Only `_KEY=` appears immediately before the `=`, so <KEY> wins.
        assert_eq!(normalize_line("A_SECRET_KEY=v"), "A_SECRET_KEY=<KEY>");
        assert_eq!(normalize_line("A_KEY_SECRET=v"), "A_KEY_SECRET=<SECRET>");
    }

    #[test]
    fn test_quoted_mapping() {
        assert_eq!(
            normalize_line(r#""host": "db.internal""#),
            r#""host": "<VALUE>""#
        );
        assert_eq!(normalize_line(r#"host: "db.internal""#), r#"host: "<VALUE>""#);
        assert_eq!(
            normalize_line(r#"  "name": """#),
            r#""name": "<VALUE>""#
        );
    }

    #[test]
    fn test_numeric_mapping() {
        assert_eq!(normalize_line("port: 5432"), "port: <NUMBER>");
        assert_eq!(normalize_line(r#""retries": 3"#), r#""retries": <NUMBER>"#);
    }

    #[test]
    fn test_list_assignment() {
        assert_eq!(
            normalize_line(r#"- "POSTGRES_USER=admin""#),
            r#"- "POSTGRES_USER=<VALUE>""#
        );
    }

    #[test]
    fn test_unrecognized_lines_pass_through_trimmed() {
        assert_eq!(normalize_line("  services:  "), "services:");
        assert_eq!(normalize_line("volumes:"), "volumes:");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            "PORT=8080",
            "DB_PASSWORD=s3cr3t",
            "API_KEY=abc",
            r#""host": "db.internal""#,
            "port: 5432",
            r#"- "POSTGRES_USER=admin""#,
            "plain text line",
        ];
        for input in inputs {
            let once = normalize_line(input);
            assert_eq!(normalize_line(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_comparable_filtering() {
        assert!(is_comparable("KEY=value"));
        assert!(is_comparable("  indented: 1"));
        assert!(!is_comparable(""));
        assert!(!is_comparable("   "));
        assert!(!is_comparable("# a comment"));
        assert!(!is_comparable("   # indented comment"));
    }
}
