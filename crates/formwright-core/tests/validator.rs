// crates/formwright-core/tests/validator.rs
// ============================================================================
// Module: Form Validator Tests
// Description: Regression coverage for whole-form validation.
// Purpose: Ensure label uniqueness, expression integrity, randomization
//          compatibility, and translation collection stay stable.
// Dependencies: formwright-core, serde_json
// ============================================================================

//! ## Overview
//! Integration tests for the single-pass validator: the walk order, the
//! label registry, calculated-field compilation, and the returned
//! translation set.

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

use formwright_core::CalculatedField;
use formwright_core::Constant;
use formwright_core::ExpressionCompileError;
use formwright_core::FieldLabel;
use formwright_core::FormNode;
use formwright_core::InvalidCalculatedFieldExpression;
use formwright_core::SchemaError;
use formwright_core::TranslationId;
use formwright_core::ValidationError;
use formwright_core::VariableDefinitionError;
use formwright_core::load_calculated_fields;
use formwright_core::load_constants;
use formwright_core::load_schema;
use formwright_core::runtime::FormValidator;
use formwright_core::runtime::ValidationOptions;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::ensure;

/// Loads a schema array, failing the test on loader errors.
fn schema(records: Vec<Value>) -> Result<Vec<FormNode>, Box<dyn std::error::Error>> {
    Ok(load_schema(&Value::Array(records))?)
}

/// Builds a calculated field over the given expression.
fn calculated(label: &str, expression: &str) -> Result<CalculatedField, Box<dyn std::error::Error>> {
    Ok(CalculatedField {
        label: FieldLabel::new(label)?,
        text_translation_id: None,
        expression: expression.to_string(),
        show_on_form: false,
        include_in_answers: false,
    })
}

/// Builds a constant with the given label and value.
fn constant(label: &str, value: Value) -> Result<Constant, Box<dyn std::error::Error>> {
    Ok(Constant {
        label: FieldLabel::new(label)?,
        text_translation_id: None,
        value,
        show_on_form: false,
        include_in_answers: false,
    })
}

/// Tests the documented happy path: two required fields, one calculated
/// field, translation ids for both questions.
#[test]
fn valid_form_returns_its_translation_ids() -> TestResult {
    let schema = schema(vec![
        support::text_field_record("name", true),
        support::rating_field_record("score", true, 5),
    ])?;
    let calculated_fields = vec![calculated("bonus", "data.score * 2")?];

    let validator = FormValidator::new(ValidationOptions::default());
    let translations = validator.validate(&schema, &[], &calculated_fields)?;

    let expected: Vec<TranslationId> =
        vec![TranslationId::new("t_name"), TranslationId::new("t_score")];
    ensure(
        translations.iter().cloned().collect::<Vec<_>>() == expected,
        format!("unexpected translation set: {translations:?}"),
    )
}

/// Tests that a field and a constant sharing a label collide.
#[test]
fn field_and_constant_labels_collide() -> TestResult {
    let schema = schema(vec![support::text_field_record("brand", true)])?;
    let constants = vec![constant("brand", json!("acme"))?];

    let validator = FormValidator::new(ValidationOptions::default());
    let result = validator.validate(&schema, &constants, &[]);
    ensure(
        matches!(
            result,
            Err(ValidationError::DuplicateVariableName { ref label }) if label == "brand"
        ),
        format!("expected duplicate label, got {result:?}"),
    )
}

/// Tests that duplicate labels hidden inside branches are still caught.
#[test]
fn duplicate_labels_inside_branches_are_caught() -> TestResult {
    let schema = schema(vec![
        support::text_field_record("name", true),
        support::binary_condition_record(
            "data.name == 'x'",
            vec![support::text_field_record("name", false)],
        ),
    ])?;
    let validator = FormValidator::new(ValidationOptions::default());
    ensure(
        matches!(
            validator.validate(&schema, &[], &[]),
            Err(ValidationError::DuplicateVariableName { .. })
        ),
        "branch-nested duplicate should be caught",
    )
}

/// Tests the documented rejection of optional-field references.
#[test]
fn calculated_field_over_optional_field_is_rejected() -> TestResult {
    let schema = schema(vec![support::rating_field_record("score", false, 5)])?;
    let calculated_fields = vec![calculated("bonus", "data.score * 2")?];

    let validator = FormValidator::new(ValidationOptions::default());
    let result = validator.validate(&schema, &[], &calculated_fields);
    ensure(
        matches!(
            result,
            Err(ValidationError::ExpressionCompile(
                ExpressionCompileError::OptionalFieldReference { ref field, .. }
            )) if field == "score"
        ),
        format!("expected optional-field rejection, got {result:?}"),
    )
}

/// Tests the documented rejection of undeclared variables.
#[test]
fn calculated_field_over_unknown_variable_is_rejected() -> TestResult {
    let schema = schema(vec![support::text_field_record("name", true)])?;
    let calculated_fields = vec![calculated("bonus", "data.unknown + 1")?];

    let validator = FormValidator::new(ValidationOptions::default());
    let result = validator.validate(&schema, &[], &calculated_fields);
    ensure(
        matches!(
            result,
            Err(ValidationError::ExpressionCompile(
                ExpressionCompileError::UndefinedVariable { ref variable, .. }
            )) if variable == "unknown"
        ),
        format!("expected undefined-variable rejection, got {result:?}"),
    )
}

/// Tests that calculated fields may use constants and required branch
/// fields.
#[test]
fn calculated_field_over_constants_and_branch_fields_passes() -> TestResult {
    let schema = schema(vec![
        support::text_field_record("name", true),
        support::binary_condition_record(
            "data.name == 'x'",
            vec![support::rating_field_record("score", true, 5)],
        ),
    ])?;
    let constants = vec![constant("base", json!(10))?];
    let calculated_fields = vec![calculated("bonus", "constants.base + data.score")?];

    let validator = FormValidator::new(ValidationOptions::default());
    let translations = validator.validate(&schema, &constants, &calculated_fields)?;
    ensure(translations.len() == 2, format!("unexpected set: {translations:?}"))
}

/// Tests that calculated-field/calculated-field references are rejected at
/// construction, before whole-form validation is reached.
#[test]
fn calculated_field_referencing_calculated_field_fails_at_construction() -> TestResult {
    let bad = calculated("total", "calculated_fields.bonus * 2")?;
    ensure(
        matches!(
            bad.check_expression(),
            Err(InvalidCalculatedFieldExpression { ref variable }) if variable == "bonus"
        ),
        "direct construction check should reject the reference",
    )?;

    let result = load_calculated_fields(&json!([
        {"label": "total", "expression": "calculated_fields.bonus * 2"},
    ]));
    ensure(
        matches!(result, Err(SchemaError::CalculatedField(_))),
        format!("loader should reject the reference, got {result:?}"),
    )
}

/// Tests the randomize/branching incompatibility.
#[test]
fn randomize_with_condition_is_rejected() -> TestResult {
    let schema = schema(vec![
        support::text_field_record("name", true),
        support::binary_condition_record(
            "data.name == 'x'",
            vec![support::text_field_record("extra", false)],
        ),
    ])?;
    let options = ValidationOptions {
        randomize: true,
        ..ValidationOptions::default()
    };
    let result = FormValidator::new(options).validate(&schema, &[], &[]);
    ensure(
        matches!(
            result,
            Err(ValidationError::RandomizeWithBranches { ref class }) if class == "BinaryCondition"
        ),
        format!("expected randomize rejection, got {result:?}"),
    )
}

/// Tests that randomize passes over a flat, field-only schema.
#[test]
fn randomize_with_flat_fields_passes() -> TestResult {
    let schema = schema(vec![
        support::text_field_record("name", true),
        support::rating_field_record("score", true, 5),
    ])?;
    let options = ValidationOptions {
        randomize: true,
        ..ValidationOptions::default()
    };
    let translations = FormValidator::new(options).validate(&schema, &[], &[])?;
    ensure(translations.len() == 2, "flat schema should validate under randomize")
}

/// Tests that form-level translation ids join the collected set.
#[test]
fn form_level_translations_are_collected() -> TestResult {
    let schema = schema(vec![support::text_field_record("name", true)])?;
    let options = ValidationOptions {
        randomize: false,
        description: Some(TranslationId::new("t_form_description")),
        instructions: Some(TranslationId::new("t_form_instructions")),
    };
    let translations = FormValidator::new(options).validate(&schema, &[], &[])?;
    ensure(
        translations.contains(&TranslationId::new("t_form_description"))
            && translations.contains(&TranslationId::new("t_form_instructions"))
            && translations.contains(&TranslationId::new("t_name")),
        format!("unexpected set: {translations:?}"),
    )
}

/// Tests that a displayed constant demands its translation at load time.
#[test]
fn displayed_constant_without_translation_is_rejected() -> TestResult {
    let result = load_constants(&json!([
        {"label": "brand", "value": "acme", "show_on_form": true},
    ]));
    ensure(
        matches!(
            result,
            Err(SchemaError::Variable(VariableDefinitionError::MissingTranslation { .. }))
        ),
        format!("expected missing-translation rejection, got {result:?}"),
    )
}

/// Tests that identical inputs always yield identical outputs.
#[test]
fn validation_is_deterministic() -> TestResult {
    let schema = schema(vec![
        support::text_field_record("name", true),
        support::rating_field_record("score", true, 5),
    ])?;
    let constants = vec![constant("base", json!(1))?];
    let calculated_fields = vec![calculated("bonus", "constants.base + data.score")?];

    let validator = FormValidator::new(ValidationOptions::default());
    let first = validator.validate(&schema, &constants, &calculated_fields)?;
    let second = validator.validate(&schema, &constants, &calculated_fields)?;
    ensure(first == second, "repeated validation should agree")
}
