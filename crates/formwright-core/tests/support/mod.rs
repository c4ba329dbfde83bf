// crates/formwright-core/tests/support/mod.rs
// ============================================================================
// Module: Formwright Test Support
// Description: Shared helpers for formwright-core integration tests.
// Purpose: Provide a uniform result alias, condition helper, and fixture
//          builders.
// Dependencies: formwright-core, serde_json
// ============================================================================

//! ## Overview
//! Shared assertion helpers and schema fixtures for the integration suites.

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

use serde_json::Value;
use serde_json::json;

/// Result alias used by every integration test.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Fails the test with `message` when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(message.into().into())
    }
}

/// Builds a minimal text-field record with the given label and requiredness.
pub fn text_field_record(label: &str, required: bool) -> Value {
    json!({
        "_cls": "TextFormField",
        "_cls_base": "BasicFormField",
        "label": label,
        "text_translation_id": format!("t_{label}"),
        "required": required,
    })
}

/// Builds a minimal rating-field record with the given label and max score.
pub fn rating_field_record(label: &str, required: bool, max_score: u32) -> Value {
    json!({
        "_cls": "RatingFormField",
        "_cls_base": "BasicFormField",
        "label": label,
        "text_translation_id": format!("t_{label}"),
        "required": required,
        "max_score": max_score,
    })
}

/// Builds a section-layout record wrapping the given children.
pub fn layout_record(children: Vec<Value>) -> Value {
    json!({
        "_cls": "SectionLayout",
        "_cls_base": "BaseLayout",
        "children": children,
    })
}

/// Builds a binary-condition record with a true branch over the given
/// children.
pub fn binary_condition_record(expression: &str, true_children: Vec<Value>) -> Value {
    json!({
        "_cls": "BinaryCondition",
        "_cls_base": "BaseCondition",
        "expression": expression,
        "true_branch": layout_record(true_children),
    })
}
