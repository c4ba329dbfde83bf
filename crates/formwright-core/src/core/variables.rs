// crates/formwright-core/src/core/variables.rs
// ============================================================================
// Module: Form Variables
// Description: Constants and calculated fields sharing the field label
//              namespace.
// Purpose: Declare named values usable in expressions, independent of the
//          field/condition/layout tree.
// Dependencies: expr-scan, serde, serde_json,
//               crate::core::{errors, identifiers}
// ============================================================================

//! ## Overview
//! Variables live outside the node tree but inside the same label namespace
//! as fields: a constant, a calculated field, and a field can never share a
//! label. Constants carry a literal value; calculated fields carry an
//! expression over constants and required fields. An expression referencing
//! another calculated field is rejected when the calculated field is
//! constructed, not during whole-form validation.

use expr_scan::Scope;
use expr_scan::extract_variables;
use expr_scan::strip_scope_prefixes;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::errors::InvalidCalculatedFieldExpression;
use crate::core::errors::VariableDefinitionError;
use crate::core::identifiers::FieldLabel;
use crate::core::identifiers::TranslationId;

// ============================================================================
// SECTION: Constant
// ============================================================================

/// A read-only named value usable in expressions.
///
/// # Invariants
/// - `text_translation_id` must be present when `show_on_form` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    /// Unique label within the form's variable namespace.
    pub label: FieldLabel,
    /// Optional translation reference for the display text.
    #[serde(default)]
    pub text_translation_id: Option<TranslationId>,
    /// Literal value of the constant.
    pub value: Value,
    /// Whether the constant is displayed on the form.
    #[serde(default)]
    pub show_on_form: bool,
    /// Whether the constant is included in the answers payload.
    #[serde(default)]
    pub include_in_answers: bool,
}

impl Constant {
    /// Checks this constant's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VariableDefinitionError`] when the label grammar is violated
    /// or a displayed constant lacks its translation reference.
    pub fn validate_definition(&self) -> Result<(), VariableDefinitionError> {
        if self.label.validate().is_err() {
            return Err(VariableDefinitionError::InvalidLabel {
                label: self.label.to_string(),
            });
        }
        if self.show_on_form && self.text_translation_id.is_none() {
            return Err(VariableDefinitionError::MissingTranslation {
                label: self.label.to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Calculated Field
// ============================================================================

/// A derived named value computed from an expression over constants and
/// required fields.
///
/// # Invariants
/// - The expression never references another calculated field; enforced at
///   construction.
/// - `text_translation_id` must be present when `show_on_form` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedField {
    /// Unique label within the form's variable namespace.
    pub label: FieldLabel,
    /// Optional translation reference for the display text.
    #[serde(default)]
    pub text_translation_id: Option<TranslationId>,
    /// JS-like expression over `data.*`/`constants.*` variables.
    pub expression: String,
    /// Whether the calculated value is displayed on the form.
    #[serde(default)]
    pub show_on_form: bool,
    /// Whether the calculated value is included in the answers payload.
    #[serde(default)]
    pub include_in_answers: bool,
}

impl CalculatedField {
    /// Checks this calculated field's configuration, expression aside.
    ///
    /// Reference integrity against declared labels is the form validator's
    /// job; this only rejects what is wrong in isolation.
    ///
    /// # Errors
    ///
    /// Returns [`VariableDefinitionError`] for label or translation problems.
    pub fn validate_definition(&self) -> Result<(), VariableDefinitionError> {
        if self.label.validate().is_err() {
            return Err(VariableDefinitionError::InvalidLabel {
                label: self.label.to_string(),
            });
        }
        if self.show_on_form && self.text_translation_id.is_none() {
            return Err(VariableDefinitionError::MissingTranslation {
                label: self.label.to_string(),
            });
        }
        Ok(())
    }

    /// Checks that the expression references no other calculated field.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCalculatedFieldExpression`] on the first
    /// `calculated_fields.*` reference.
    pub fn check_expression(&self) -> Result<(), InvalidCalculatedFieldExpression> {
        for variable in self.expression_variables() {
            if Scope::CalculatedFields.matches(&variable) {
                return Err(InvalidCalculatedFieldExpression {
                    variable: strip_scope_prefixes(&variable).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the variables referenced by the expression, in order of first
    /// occurrence.
    #[must_use]
    pub fn expression_variables(&self) -> Vec<String> {
        extract_variables(&self.expression)
    }
}
