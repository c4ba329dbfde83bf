// crates/formwright-core/examples/minimal.rs
// ============================================================================
// Module: Formwright Minimal Example
// Description: Minimal end-to-end load-and-validate pass over a small form.
// Purpose: Demonstrate payload loading, validation, and translation
//          collection.
// Dependencies: formwright-core, serde_json
// ============================================================================

//! ## Overview
//! Loads a small feedback form -- two questions, one constant, one
//! calculated field, one conditional follow-up -- and validates it the way
//! the owning form entity would on save.

use formwright_core::FormPayload;
use formwright_core::TranslationId;
use formwright_core::runtime::FormValidator;
use formwright_core::runtime::ValidationOptions;
use serde_json::json;

/// Error type for example preconditions.
#[derive(Debug)]
struct ExampleError(&'static str);

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ExampleError {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payload = FormPayload::from_value(&json!({
        "schema": [
            {
                "_cls": "TextFormField",
                "_cls_base": "BasicFormField",
                "label": "name",
                "text_translation_id": "t_name",
                "required": true,
            },
            {
                "_cls": "RatingFormField",
                "_cls_base": "BasicFormField",
                "label": "score",
                "text_translation_id": "t_score",
                "required": true,
                "max_score": 5,
            },
            {
                "_cls": "BinaryCondition",
                "_cls_base": "BaseCondition",
                "expression": "data.score <= constants.low_score",
                "validate_expr_var": true,
                "true_branch": {
                    "_cls": "SectionLayout",
                    "_cls_base": "BaseLayout",
                    "title": "Tell us more",
                    "children": [
                        {
                            "_cls": "TextAreaFormField",
                            "_cls_base": "BasicFormField",
                            "label": "complaint",
                            "text_translation_id": "t_complaint",
                        },
                    ],
                },
            },
        ],
        "constants": [
            {"label": "low_score", "value": 2},
        ],
        "calculated_fields": [
            {"label": "weighted", "expression": "data.score * 20"},
        ],
    }))?;

    let validator = FormValidator::new(ValidationOptions::default());
    let translations = validator.validate_payload(&payload)?;

    if !translations.contains(&TranslationId::new("t_complaint")) {
        return Err(Box::new(ExampleError("branch translations must be collected")));
    }
    if translations.len() != 3 {
        return Err(Box::new(ExampleError("expected exactly three translation ids")));
    }

    // Round-trip the payload the way an editor save would.
    let reloaded = FormPayload::from_value(&payload.to_value()?)?;
    if reloaded != payload {
        return Err(Box::new(ExampleError("round-trip must preserve the schema")));
    }
    Ok(())
}
