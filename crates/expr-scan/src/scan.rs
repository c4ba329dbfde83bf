// crates/expr-scan/src/scan.rs
// ============================================================================
// Module: Identifier Scanner
// Description: Regex-based identifier extraction from expression text.
// Purpose: Produce the ordered, de-duplicated variable list an expression
//          references.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! The scanner matches identifier-like tokens: a letter, underscore, or `$`,
//! followed by one or more alphanumerics, underscores, or dots. Dotted paths
//! such as `data.score` are captured as a single token so scope resolution
//! can happen downstream.
//!
//! Known limitation: this is a lexical approximation. A string literal such
//! as `"a.b"` inside the expression is indistinguishable from a variable
//! reference, and reserved words (`true`, `null`) are reported as matches.
//! Callers that need exact semantics must replace this with a real tokenizer.

use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted expression size in bytes.
///
/// Expressions are author-controlled but flow through shared storage; larger
/// input yields no matches instead of an unbounded scan.
pub const MAX_EXPRESSION_BYTES: usize = 64 * 1024;

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Identifier token pattern: `[$a-z_]` head, `[a-z0-9_.]+` tail,
/// case-insensitive.
#[allow(clippy::expect_used, reason = "The pattern is a compile-time constant.")]
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)[$a-z_][a-z0-9_.]+").expect("identifier pattern must compile"));

/// Extracts identifier-like tokens from `code` in order of first occurrence.
///
/// Duplicates are dropped, keeping the earliest occurrence. Input larger than
/// [`MAX_EXPRESSION_BYTES`] yields an empty list.
#[must_use]
pub fn extract_variables(code: &str) -> Vec<String> {
    if code.len() > MAX_EXPRESSION_BYTES {
        return Vec::new();
    }

    let mut variables: Vec<String> = Vec::new();
    for matched in IDENTIFIER.find_iter(code) {
        let token = matched.as_str();
        if !variables.iter().any(|seen| seen == token) {
            variables.push(token.to_string());
        }
    }
    variables
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "Test-only output and panic-based assertions are permitted."
)]
mod tests {
    use super::extract_variables;

    #[test]
    fn extracts_dotted_paths_as_single_tokens() {
        let vars = extract_variables("data.score * 2 + constants.base");
        assert_eq!(vars, vec!["data.score", "constants.base"]);
    }

    #[test]
    fn deduplicates_preserving_first_occurrence() {
        let vars = extract_variables("data.a + data.b + data.a");
        assert_eq!(vars, vec!["data.a", "data.b"]);
    }

    #[test]
    fn ignores_bare_numbers_and_operators() {
        let vars = extract_variables("12 + 34 * (56 / 78)");
        assert!(vars.is_empty());
    }

    #[test]
    fn oversized_input_yields_nothing() {
        let code = "data.x + ".repeat(super::MAX_EXPRESSION_BYTES / 4);
        assert!(extract_variables(&code).is_empty());
    }
}
