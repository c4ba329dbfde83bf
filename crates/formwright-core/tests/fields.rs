// crates/formwright-core/tests/fields.rs
// ============================================================================
// Module: Field Definition Tests
// Description: Regression coverage for field construction and answer
//              validation.
// Purpose: Ensure impossible configurations are rejected at construction and
//          bad answers at answer time.
// Dependencies: formwright-core, serde_json
// ============================================================================

//! ## Overview
//! Integration tests for every field variant's construction validation and
//! the answer-time checks exposed through `validate_value`.

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

use formwright_core::FieldDefinitionError;
use formwright_core::FieldKind;
use formwright_core::FieldLabel;
use formwright_core::FieldMeta;
use formwright_core::FieldValueError;
use formwright_core::FormField;
use formwright_core::FormNode;
use formwright_core::SchemaError;
use formwright_core::Widget;
use formwright_core::core::fields::EmailField;
use formwright_core::core::fields::MultiSelectField;
use formwright_core::core::fields::NumberField;
use formwright_core::core::fields::PasswordField;
use formwright_core::core::fields::TextField;
use formwright_core::load_node;
use serde_json::json;
use support::TestResult;
use support::ensure;

/// Builds a field with default metadata around the given kind.
fn field(label: &str, required: bool, kind: FieldKind) -> Result<FormField, Box<dyn std::error::Error>> {
    Ok(FormField {
        meta: FieldMeta {
            label: FieldLabel::new(label)?,
            text_translation_id: formwright_core::TranslationId::new(format!("t_{label}")),
            required,
            request_response: false,
            description: None,
            default_error_message: None,
            user_notes: None,
            widget: None,
        },
        kind,
    })
}

/// Tests that min/max length conflicts are rejected at construction.
#[test]
fn text_length_bounds_conflict_is_rejected() -> TestResult {
    let text = field(
        "name",
        true,
        FieldKind::Text(TextField {
            min_length: 10,
            max_length: 5,
            allow_special_chars: true,
        }),
    )?;
    ensure(
        matches!(
            text.validate_definition(),
            Err(FieldDefinitionError::LengthBounds { .. })
        ),
        "min > max length should be rejected",
    )
}

/// Tests that a negative minimum conflicts with `allow_negative = false`.
#[test]
fn negative_minimum_conflict_is_rejected() -> TestResult {
    let number = field(
        "age",
        true,
        FieldKind::Number(NumberField {
            min_length: 0,
            max_length: 5,
            allow_negative: false,
            min_value: Some(-10),
            max_value: None,
        }),
    )?;
    ensure(
        matches!(
            number.validate_definition(),
            Err(FieldDefinitionError::NegativeMinimum { .. })
        ),
        "negative minimum with negatives disallowed should be rejected",
    )
}

/// Tests the documented "other" collision: a declared choice reusing the
/// other value.
#[test]
fn other_value_collision_is_rejected() -> TestResult {
    let record = json!({
        "_cls": "MCSSFormField",
        "_cls_base": "BasicFormField",
        "label": "consent",
        "text_translation_id": "t_consent",
        "list_choices": [
            {"value": "yes", "text": "Yes"},
            {"value": "no", "text": "No"},
        ],
        "allow_other": true,
        "other_value": "yes",
    });
    let loaded = load_node(&record);
    ensure(
        matches!(
            loaded,
            Err(SchemaError::Field(FieldDefinitionError::OtherValueCollision { ref value }))
                if value == "yes"
        ),
        format!("expected other-value collision, got {loaded:?}"),
    )
}

/// Tests the rating score window boundaries.
#[test]
fn rating_score_window_is_inclusive() -> TestResult {
    for (score, ok) in [(2_u32, false), (3, true), (12, true), (13, false)] {
        let loaded = load_node(&support::rating_field_record("score", true, score));
        ensure(
            loaded.is_ok() == ok,
            format!("max_score {score} acceptance should be {ok}"),
        )?;
    }
    Ok(())
}

/// Tests that a widget outside the variant's set is rejected.
#[test]
fn widget_outside_variant_set_is_rejected() -> TestResult {
    let record = json!({
        "_cls": "TextFormField",
        "_cls_base": "BasicFormField",
        "label": "name",
        "text_translation_id": "t_name",
        "widget": "rating_stars",
    });
    let loaded = load_node(&record);
    ensure(
        matches!(
            loaded,
            Err(SchemaError::Field(FieldDefinitionError::WidgetNotAllowed { .. }))
        ),
        format!("expected widget rejection, got {loaded:?}"),
    )
}

/// Tests that heterogeneous choice lists are rejected.
#[test]
fn choice_type_mismatch_is_rejected() -> TestResult {
    let record = json!({
        "_cls": "MCSSFormField",
        "_cls_base": "BasicFormField",
        "label": "size",
        "text_translation_id": "t_size",
        "choice_type": "int",
        "list_choices": [
            {"value": 1, "text": "One"},
            {"value": "two", "text": "Two"},
        ],
    });
    ensure(
        matches!(
            load_node(&record),
            Err(SchemaError::Field(FieldDefinitionError::ChoiceValueType { .. }))
        ),
        "int choice list with a string value should be rejected",
    )
}

/// Tests that the minimum selection cannot exceed the choice count.
#[test]
fn selection_exceeding_choices_is_rejected() -> TestResult {
    let select = field(
        "toppings",
        false,
        FieldKind::MultiSelect(MultiSelectField {
            choice_type: formwright_core::ChoiceType::String,
            list_choices: vec![formwright_core::Choice {
                value: json!("cheese"),
                text: "Cheese".to_string(),
            }],
            choice_ordering: formwright_core::ChoiceOrder::Default,
            min_selection: Some(3),
            max_selection: None,
            allow_other: false,
            other_value: None,
            other_text: None,
            other_question: None,
        }),
    )?;
    ensure(
        matches!(
            select.validate_definition(),
            Err(FieldDefinitionError::SelectionExceedsChoices { .. })
        ),
        "min_selection above the choice count should be rejected",
    )
}

/// Tests label grammar enforcement through the loader.
#[test]
fn double_underscore_label_is_rejected() -> TestResult {
    let loaded = load_node(&support::text_field_record("bad__label", true));
    ensure(
        matches!(
            loaded,
            Err(SchemaError::Field(FieldDefinitionError::InvalidLabel { .. }))
        ),
        format!("double underscore should be rejected, got {loaded:?}"),
    )
}

/// Tests required-empty and optional-empty answers.
#[test]
fn required_empty_answer_is_rejected() -> TestResult {
    let required = field("name", true, FieldKind::Text(TextField {
        min_length: 0,
        max_length: 128,
        allow_special_chars: true,
    }))?;
    ensure(
        matches!(required.validate_value(&json!(null)), Err(FieldValueError::Empty)),
        "required null answer should be rejected",
    )?;
    ensure(
        matches!(required.validate_value(&json!("")), Err(FieldValueError::Empty)),
        "required empty-string answer should be rejected",
    )?;

    let optional = field("nick", false, FieldKind::Text(TextField {
        min_length: 0,
        max_length: 128,
        allow_special_chars: true,
    }))?;
    ensure(optional.validate_value(&json!(null)).is_ok(), "optional empty answer should pass")
}

/// Tests the special-character charset at answer time.
#[test]
fn special_characters_rejected_when_disallowed() -> TestResult {
    let text = field("code", true, FieldKind::Text(TextField {
        min_length: 0,
        max_length: 128,
        allow_special_chars: false,
    }))?;
    ensure(
        matches!(
            text.validate_value(&json!("abc-123")),
            Err(FieldValueError::SpecialCharacters)
        ),
        "dash should be rejected",
    )?;
    ensure(text.validate_value(&json!("abc123")).is_ok(), "alphanumerics should pass")
}

/// Tests email shape checking at answer time.
#[test]
fn email_shape_is_checked_at_answer_time() -> TestResult {
    let email = field("contact", true, FieldKind::Email(EmailField {
        max_length: 254,
    }))?;
    ensure(
        matches!(
            email.validate_value(&json!("not-an-email")),
            Err(FieldValueError::InvalidEmail { .. })
        ),
        "malformed email should be rejected",
    )?;
    ensure(
        email.validate_value(&json!("user@example.com")).is_ok(),
        "well-formed email should pass",
    )
}

/// Tests numeric bounds, including the implied zero floor when negatives are
/// disallowed.
#[test]
fn number_bounds_apply_at_answer_time() -> TestResult {
    let number = field("age", true, FieldKind::Number(NumberField {
        min_length: 0,
        max_length: 5,
        allow_negative: false,
        min_value: None,
        max_value: Some(120),
    }))?;
    ensure(
        matches!(
            number.validate_value(&json!(-5)),
            Err(FieldValueError::BelowMinimum { .. })
        ),
        "negative answer should hit the implied zero floor",
    )?;
    ensure(
        matches!(
            number.validate_value(&json!(150)),
            Err(FieldValueError::AboveMaximum { .. })
        ),
        "answer above max_value should be rejected",
    )?;
    ensure(number.validate_value(&json!(42)).is_ok(), "in-range answer should pass")
}

/// Tests the password pattern accessors.
#[test]
fn password_pattern_reflects_charset_flags() -> TestResult {
    let password = PasswordField {
        allow_alphabets: true,
        allow_numbers: true,
        allow_special_chars: false,
    };
    ensure(password.pattern() == "/^[a-zA-Z\\d]+$/", format!("pattern: {}", password.pattern()))?;
    ensure(
        password.pattern_error() == "Please use alphabets, numbers only.",
        format!("error: {}", password.pattern_error()),
    )
}

/// Tests that the default widget resolves per variant.
#[test]
fn default_widget_resolves_per_variant() -> TestResult {
    let node = load_node(&support::rating_field_record("score", true, 5))?;
    let FormNode::Field(rating) = node else {
        return Err("expected a field node".into());
    };
    ensure(rating.widget() == Widget::RatingStars, "rating default widget should be stars")?;
    ensure(
        rating.all_choice_values() == Some((1..=5).map(serde_json::Value::from).collect()),
        "rating choices should span 1..=max_score",
    )
}
