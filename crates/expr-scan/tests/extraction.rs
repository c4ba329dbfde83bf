// crates/expr-scan/tests/extraction.rs
// ============================================================================
// Module: Extraction Tests
// Description: Regression coverage for identifier extraction and guards.
// Purpose: Ensure the lexical scan, scope handling, and null-guard synthesis
//          stay stable for downstream schema validation.
// Dependencies: expr-scan
// ============================================================================

//! ## Overview
//! Integration tests for the public expr-scan surface: ordered extraction,
//! scope stripping, and null-guard output shapes.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use expr_scan::Scope;
use expr_scan::extract_variables;
use expr_scan::null_guard;
use expr_scan::strip_scope_prefixes;
use support::TestResult;
use support::ensure;

/// Tests ordered extraction over a realistic branching expression.
#[test]
fn extraction_order_matches_document_order() -> TestResult {
    let vars = extract_variables("data.age >= constants.cutoff && data.consent == 'yes'");
    ensure(
        vars == ["data.age", "constants.cutoff", "data.consent", "yes"],
        format!("unexpected variables: {vars:?}"),
    )
}

/// Tests that the lexical scan reports string-literal content; callers must
/// tolerate the false positives.
#[test]
fn string_literals_are_reported_as_tokens() -> TestResult {
    let vars = extract_variables("data.city == \"new.york\"");
    ensure(vars.contains(&"new.york".to_string()), "literal content should be reported")?;
    ensure(vars.contains(&"data.city".to_string()), "real reference should be reported")
}

/// Tests single-character identifiers are outside the token grammar.
#[test]
fn single_character_identifiers_are_not_matched() -> TestResult {
    let vars = extract_variables("x + 1");
    ensure(vars.is_empty(), format!("expected no tokens, got {vars:?}"))
}

/// Tests scope stripping for every recognized prefix.
#[test]
fn scope_stripping_round_trips_bare_names() -> TestResult {
    for raw in [
        "data.score",
        "constants.score",
        "calculated_fields.score",
        "$scope.data.score",
        "score",
    ] {
        ensure(
            strip_scope_prefixes(raw) == "score",
            format!("stripping {raw} should yield the bare name"),
        )?;
    }
    Ok(())
}

/// Tests scope classification.
#[test]
fn scope_matching_is_prefix_exact() -> TestResult {
    ensure(Scope::Data.matches("data.score"), "data scope should match")?;
    ensure(!Scope::Data.matches("database.score"), "prefix must end at the dot")?;
    ensure(
        Scope::CalculatedFields.matches("$scope.calculated_fields.bonus"),
        "wrapper prefix should be transparent",
    )
}

/// Tests end-to-end guard synthesis from raw expression text.
#[test]
fn null_guard_covers_every_scoped_reference_once() -> TestResult {
    let vars = extract_variables("data.a > 1 || (data.a < 0 && constants.limit > data.b)");
    let guard = null_guard(&vars).ok_or("expected a guard")?;
    ensure(
        guard == "!(data.a == null || constants.limit == null || data.b == null)",
        format!("unexpected guard: {guard}"),
    )
}
