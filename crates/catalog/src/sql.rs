//! Statement hygiene for oracle-generated SQL.
//!
//! Everything the oracle returns is untrusted input. This module turns raw
//! oracle text into a list of candidate statements and validates each one
//! against a read-only discipline before it is allowed anywhere near the
//! catalog. The instruction profile asks for the same rules, but instruction
//! text is not enforcement; these checks are.

use shelfmate_core::{AppError, AppResult};

/// Keywords that disqualify a statement outright. Matched on word
/// boundaries, case-insensitive.
const FORBIDDEN_KEYWORDS: [&str; 13] = [
    "insert", "update", "delete", "drop", "alter", "create", "replace", "attach", "detach",
    "pragma", "vacuum", "reindex", "grant",
];

/// Split raw oracle output into candidate statement strings.
///
/// The translation profile asks for a JSON array of statement strings; that
/// is the primary contract. Oracles that answer with bare SQL instead are
/// handled by falling back to splitting on `;`, which preserves the
/// multi-statement semantics for compound intents either way. Markdown code
/// fences are stripped first since models add them despite instructions.
pub fn parse_statement_list(raw: &str) -> Vec<String> {
    let cleaned = strip_code_fences(raw);
    let trimmed = cleaned.trim();

    if let Ok(statements) = serde_json::from_str::<Vec<String>>(trimmed) {
        return statements
            .into_iter()
            .map(|s| s.trim().trim_end_matches(';').trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    trimmed
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Remove markdown code fences (``` / ```json / ```sql) from oracle output.
pub fn strip_code_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate that a statement is a single pure read.
///
/// Rejects anything that does not begin with `SELECT`, anything containing
/// a mutation or DDL keyword anywhere (including in subqueries), and
/// anything that tries to smuggle a second statement behind a semicolon.
pub fn validate_read_only(statement: &str) -> AppResult<()> {
    let trimmed = statement.trim();

    if trimmed.is_empty() {
        return Err(AppError::Translation("Empty statement".to_string()));
    }

    let lowered = trimmed.to_lowercase();

    if !lowered.starts_with("select") {
        return Err(AppError::Translation(format!(
            "Not a read statement: {}",
            preview(trimmed)
        )));
    }

    if trimmed.contains(';') {
        return Err(AppError::Translation(format!(
            "Multiple statements are not allowed: {}",
            preview(trimmed)
        )));
    }

    for word in lowered.split(|c: char| !c.is_ascii_alphanumeric() && c != '_') {
        if FORBIDDEN_KEYWORDS.contains(&word) {
            return Err(AppError::Translation(format!(
                "Forbidden keyword '{}' in statement: {}",
                word,
                preview(trimmed)
            )));
        }
    }

    Ok(())
}

/// Truncate a statement for log and error messages.
fn preview(statement: &str) -> String {
    const MAX: usize = 80;
    if statement.len() > MAX {
        format!("{}...", &statement[..MAX])
    } else {
        statement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let raw = r#"["SELECT * FROM products LIMIT 5", "SELECT name FROM products LIMIT 1"]"#;
        let statements = parse_statement_list(raw);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], "SELECT * FROM products LIMIT 5");
    }

    #[test]
    fn test_parse_json_array_in_fences() {
        let raw = "```json\n[\"SELECT name FROM products LIMIT 5\"]\n```";
        let statements = parse_statement_list(raw);
        assert_eq!(statements, vec!["SELECT name FROM products LIMIT 5"]);
    }

    #[test]
    fn test_parse_bare_sql_fallback() {
        let raw = "SELECT * FROM products ORDER BY price DESC LIMIT 2;\nSELECT * FROM products ORDER BY price ASC LIMIT 3";
        let statements = parse_statement_list(raw);
        assert_eq!(statements.len(), 2);
        assert!(statements[1].ends_with("LIMIT 3"));
    }

    #[test]
    fn test_parse_strips_trailing_semicolons_from_array_elements() {
        let raw = r#"["SELECT * FROM products LIMIT 5;"]"#;
        let statements = parse_statement_list(raw);
        assert_eq!(statements, vec!["SELECT * FROM products LIMIT 5"]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_statement_list("").is_empty());
        assert!(parse_statement_list("```\n```").is_empty());
    }

    #[test]
    fn test_validate_accepts_select() {
        assert!(validate_read_only("SELECT * FROM products WHERE status = 1 LIMIT 5").is_ok());
        assert!(validate_read_only("  select name from products limit 1").is_ok());
    }

    #[test]
    fn test_validate_rejects_mutations() {
        for statement in [
            "INSERT INTO products VALUES (1)",
            "DELETE FROM products",
            "UPDATE products SET price = 0",
            "DROP TABLE products",
            "PRAGMA writable_schema = 1",
        ] {
            assert!(
                matches!(validate_read_only(statement), Err(AppError::Translation(_))),
                "should reject: {}",
                statement
            );
        }
    }

    #[test]
    fn test_validate_rejects_smuggled_second_statement() {
        let statement = "SELECT * FROM products; DROP TABLE products";
        assert!(validate_read_only(statement).is_err());
    }

    #[test]
    fn test_validate_rejects_forbidden_keyword_in_subquery() {
        let statement = "SELECT * FROM products WHERE id IN (DELETE FROM products)";
        assert!(validate_read_only(statement).is_err());
    }

    #[test]
    fn test_validate_rejects_non_select_read_keywords() {
        // Even harmless-looking non-SELECT statements are dropped
        assert!(validate_read_only("EXPLAIN SELECT * FROM products").is_err());
        assert!(validate_read_only("WITH x AS (SELECT 1) SELECT * FROM x").is_err());
    }

    #[test]
    fn test_validate_does_not_flag_substrings_of_column_names() {
        // "created_at"-style identifiers must not trip the "create" keyword
        let statement = "SELECT created_at FROM products LIMIT 5";
        assert!(validate_read_only(statement).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert!(validate_read_only("   ").is_err());
    }
}
