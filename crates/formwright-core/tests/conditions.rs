// crates/formwright-core/tests/conditions.rs
// ============================================================================
// Module: Condition Definition Tests
// Description: Regression coverage for branch structure and guard synthesis.
// Purpose: Ensure switch symmetry, default-branch rules, and null guards
//          stay stable.
// Dependencies: formwright-core, serde_json
// ============================================================================

//! ## Overview
//! Integration tests for binary/switch condition construction and the
//! derived null-guard expression used by `validate_expr_var`.

#![allow(dead_code, reason = "Common module may have unused helpers.")]
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

use formwright_core::ConditionDefinitionError;
use formwright_core::FormNode;
use formwright_core::SchemaError;
use formwright_core::load_node;
use serde_json::json;
use support::TestResult;
use support::ensure;

/// Tests the documented case/branch length mismatch rejection.
#[test]
fn switch_case_branch_mismatch_is_rejected() -> TestResult {
    let record = json!({
        "_cls": "SwitchCondition",
        "_cls_base": "BaseCondition",
        "expression": "data.city",
        "list_cases": ["a", "b"],
        "list_branches": [support::layout_record(vec![
            support::text_field_record("a_detail", false),
        ])],
    });
    let loaded = load_node(&record);
    ensure(
        matches!(
            loaded,
            Err(SchemaError::Condition(ConditionDefinitionError::CaseBranchMismatch {
                cases: 2,
                branches: 1,
            }))
        ),
        format!("expected case/branch mismatch, got {loaded:?}"),
    )
}

/// Tests that `use_default` demands a default branch.
#[test]
fn use_default_without_branch_is_rejected() -> TestResult {
    let record = json!({
        "_cls": "SwitchCondition",
        "_cls_base": "BaseCondition",
        "expression": "data.city",
        "list_cases": ["a"],
        "list_branches": [support::layout_record(vec![])],
        "use_default": true,
    });
    let loaded = load_node(&record);
    ensure(
        matches!(
            loaded,
            Err(SchemaError::Condition(ConditionDefinitionError::MissingDefaultBranch))
        ),
        format!("expected missing default branch, got {loaded:?}"),
    )
}

/// Tests switch case/branch pairing order.
#[test]
fn switch_cases_pair_in_declaration_order() -> TestResult {
    let record = json!({
        "_cls": "SwitchCondition",
        "_cls_base": "BaseCondition",
        "expression": "data.city",
        "list_cases": ["north", "south"],
        "list_branches": [
            support::layout_record(vec![support::text_field_record("north_detail", false)]),
            support::layout_record(vec![support::text_field_record("south_detail", false)]),
        ],
    });
    let FormNode::Condition(condition) = load_node(&record)? else {
        return Err("expected a condition node".into());
    };
    let cases = condition.cases();
    ensure(cases.len() == 2, "expected two paired cases")?;
    ensure(cases[0].0 == &json!("north"), "first case should be 'north'")?;
    ensure(cases[1].0 == &json!("south"), "second case should be 'south'")
}

/// Tests null-guard synthesis over the referenced variables.
#[test]
fn null_guard_covers_scoped_variables() -> TestResult {
    let record = support::binary_condition_record(
        "data.age >= constants.cutoff",
        vec![support::text_field_record("detail", false)],
    );
    let FormNode::Condition(condition) = load_node(&record)? else {
        return Err("expected a condition node".into());
    };
    ensure(
        condition.null_guard_expression().as_deref()
            == Some("!(data.age == null || constants.cutoff == null)"),
        format!("unexpected guard: {:?}", condition.null_guard_expression()),
    )
}

/// Tests that an unscoped expression yields no guard.
#[test]
fn null_guard_absent_without_scoped_variables() -> TestResult {
    let record = support::binary_condition_record(
        "true",
        vec![support::text_field_record("detail", false)],
    );
    let FormNode::Condition(condition) = load_node(&record)? else {
        return Err("expected a condition node".into());
    };
    ensure(condition.null_guard_expression().is_none(), "guard should be absent")
}

/// Tests that a binary condition requires its true branch.
#[test]
fn binary_condition_requires_true_branch() -> TestResult {
    let record = json!({
        "_cls": "BinaryCondition",
        "_cls_base": "BaseCondition",
        "expression": "data.ok",
    });
    ensure(
        matches!(load_node(&record), Err(SchemaError::Malformed { .. })),
        "missing true branch should be rejected",
    )
}
