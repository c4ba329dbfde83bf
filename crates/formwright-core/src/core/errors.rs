// crates/formwright-core/src/core/errors.rs
// ============================================================================
// Module: Formwright Error Taxonomy
// Description: Typed errors for field, condition, layout, variable, loader,
//              and whole-form validation failures.
// Purpose: Give every rejection a stable, programmatically matchable shape.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every error raised by the engine is synchronous and propagates to the
//! caller of the owning save/publish operation. There is no local recovery,
//! no retry, and no partial commit: a schema that raises any of these is
//! never persisted. Mapping errors to user-facing messages is the surrounding
//! application layer's responsibility.

use thiserror::Error;

use crate::core::widgets::Widget;

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// Invalid field configuration detected at construction time.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldDefinitionError {
    /// Label violates the identifier rules shared by fields and variables.
    #[error("label '{label}' cannot contain special characters, spaces, or double underscores")]
    InvalidLabel {
        /// The rejected label text.
        label: String,
    },
    /// Minimum length exceeds maximum length.
    #[error("minimum length {min_length} cannot be greater than maximum length {max_length}")]
    LengthBounds {
        /// Configured minimum length.
        min_length: u32,
        /// Configured maximum length.
        max_length: u32,
    },
    /// Minimum value exceeds maximum value.
    #[error("minimum value {min_value} cannot be greater than maximum value {max_value}")]
    ValueBounds {
        /// Configured minimum value, rendered for display.
        min_value: String,
        /// Configured maximum value, rendered for display.
        max_value: String,
    },
    /// Negative minimum configured while negatives are disallowed.
    #[error("minimum value {min_value} cannot be negative since negatives are not allowed")]
    NegativeMinimum {
        /// Configured minimum value, rendered for display.
        min_value: String,
    },
    /// A choice value does not match the declared choice type.
    #[error("choice value '{value}' is not of type {expected}")]
    ChoiceValueType {
        /// The offending choice value, rendered for display.
        value: String,
        /// The declared choice type name.
        expected: &'static str,
    },
    /// The "other" option value collides with a declared choice.
    #[error("choice list cannot contain '{value}' since it is already used as the 'Other' option")]
    OtherValueCollision {
        /// The colliding value.
        value: String,
    },
    /// The "other" option is enabled without its value, text, or question.
    #[error("'other_value', 'other_text', and 'other_question' are required when 'allow_other' is set")]
    MissingOtherTexts,
    /// Minimum selection exceeds maximum selection.
    #[error("minimum selection {min_selection} cannot be greater than maximum selection {max_selection}")]
    SelectionBounds {
        /// Configured minimum selection count.
        min_selection: u32,
        /// Configured maximum selection count.
        max_selection: u32,
    },
    /// Minimum selection exceeds the number of declared choices.
    #[error("minimum selection {min_selection} cannot be greater than the choice count {choices}")]
    SelectionExceedsChoices {
        /// Configured minimum selection count.
        min_selection: u32,
        /// Number of declared choices.
        choices: usize,
    },
    /// Rating maximum score lies outside the supported range.
    #[error("max score {max_score} must be between 3 and 12")]
    RatingScoreRange {
        /// Configured maximum score.
        max_score: u32,
    },
    /// Widget is not in the field variant's allowed set.
    #[error("widget '{widget}' is not available for {class}")]
    WidgetNotAllowed {
        /// The rejected widget.
        widget: Widget,
        /// Wire name of the field variant.
        class: &'static str,
    },
}

/// Invalid answer for a field, detected at answer time.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValueError {
    /// A required field received an empty answer.
    #[error("value cannot be empty")]
    Empty,
    /// The answer contains characters outside the allowed set.
    #[error("value cannot contain special characters")]
    SpecialCharacters,
    /// The answer is not a well-formed email address.
    #[error("invalid email '{value}'")]
    InvalidEmail {
        /// The rejected answer text.
        value: String,
    },
    /// The answer is shorter or longer than the configured length bounds.
    #[error("value length {length} is outside the allowed range {min_length}..={max_length}")]
    LengthOutOfBounds {
        /// Answer length in characters.
        length: usize,
        /// Configured minimum length.
        min_length: u32,
        /// Configured maximum length.
        max_length: u32,
    },
    /// The answer lies below the smallest accepted value.
    #[error("value {value} is below the minimum {minimum}")]
    BelowMinimum {
        /// The rejected answer, rendered for display.
        value: String,
        /// The smallest accepted value, rendered for display.
        minimum: String,
    },
    /// The answer lies above the largest accepted value.
    #[error("value {value} is above the maximum {maximum}")]
    AboveMaximum {
        /// The rejected answer, rendered for display.
        value: String,
        /// The largest accepted value, rendered for display.
        maximum: String,
    },
    /// The answer does not have the type the field expects.
    #[error("value does not match the expected type for this field")]
    WrongType,
}

// ============================================================================
// SECTION: Condition and Layout Errors
// ============================================================================

/// Malformed branch or case configuration on a condition.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionDefinitionError {
    /// `list_cases` and `list_branches` differ in length.
    #[error("'list_cases' ({cases}) is not of equal length with 'list_branches' ({branches})")]
    CaseBranchMismatch {
        /// Number of cases.
        cases: usize,
        /// Number of branches.
        branches: usize,
    },
    /// `use_default` is set without a default branch.
    #[error("default branch required since 'use_default' is set")]
    MissingDefaultBranch,
}

/// Malformed layout structure.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutDefinitionError {
    /// A layout appeared directly inside another layout's children.
    #[error("layout children must be fields or conditions, found nested layout '{class}'")]
    NestedLayout {
        /// Wire name of the offending child.
        class: String,
    },
}

// ============================================================================
// SECTION: Variable Errors
// ============================================================================

/// Invalid constant or calculated-field configuration at construction time.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableDefinitionError {
    /// A variable shown on the form is missing its translation reference.
    #[error("text translation required for '{label}' since 'show_on_form' is set")]
    MissingTranslation {
        /// Label of the offending variable.
        label: String,
    },
    /// Label violates the identifier rules shared by fields and variables.
    #[error("label '{label}' cannot contain special characters, spaces, or double underscores")]
    InvalidLabel {
        /// The rejected label text.
        label: String,
    },
}

/// A calculated field's expression references another calculated field.
///
/// Raised when the calculated field is constructed, never during whole-form
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("calculated field expression cannot use another calculated field '{variable}'")]
pub struct InvalidCalculatedFieldExpression {
    /// The referenced calculated-field variable, scope prefix stripped.
    pub variable: String,
}

// ============================================================================
// SECTION: Loader Errors
// ============================================================================

/// Failures while materializing the typed tree from serialized records.
///
/// # Invariants
/// - `InvalidFormClass` is fatal; there is no fallback dispatch.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The discriminator names no registered variant.
    #[error("'{class}' is not a valid form class")]
    InvalidFormClass {
        /// The unresolved discriminator tag.
        class: String,
    },
    /// A node record is missing a required discriminator key.
    #[error("node record is missing the '{key}' discriminator")]
    MissingDiscriminator {
        /// The absent key.
        key: &'static str,
    },
    /// A node record is not a JSON object, or a payload key has the wrong
    /// shape.
    #[error("malformed node record: {detail}")]
    Malformed {
        /// Decoder diagnostic.
        detail: String,
    },
    /// The tree nests deeper than the supported limit.
    #[error("schema nesting exceeds the supported depth of {max_depth}")]
    NestingTooDeep {
        /// Maximum supported depth.
        max_depth: usize,
    },
    /// A field failed construction validation.
    #[error(transparent)]
    Field(#[from] FieldDefinitionError),
    /// A condition failed construction validation.
    #[error(transparent)]
    Condition(#[from] ConditionDefinitionError),
    /// A layout failed construction validation.
    #[error(transparent)]
    Layout(#[from] LayoutDefinitionError),
    /// A constant or calculated field failed construction validation.
    #[error(transparent)]
    Variable(#[from] VariableDefinitionError),
    /// A calculated field referenced another calculated field.
    #[error(transparent)]
    CalculatedField(#[from] InvalidCalculatedFieldExpression),
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// A calculated-field expression failed dependency resolution.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionCompileError {
    /// The expression references a variable that was never declared.
    #[error("undefined variable '{variable}' in the expression for calculated field '{calculated_field}'")]
    UndefinedVariable {
        /// Bare variable name, scope prefix stripped.
        variable: String,
        /// Label of the calculated field being compiled.
        calculated_field: String,
    },
    /// The expression references a field that is not required.
    #[error("field '{field}' must be required to be used in the expression for calculated field '{calculated_field}'")]
    OptionalFieldReference {
        /// Label of the referenced field.
        field: String,
        /// Label of the calculated field being compiled.
        calculated_field: String,
    },
}

/// Whole-form validation failures.
///
/// The validator stops at the first violated invariant; a form is either
/// fully valid or rejected with exactly one of these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Two fields, constants, or calculated fields share a label.
    #[error("duplicate variable with label '{label}'")]
    DuplicateVariableName {
        /// The colliding label.
        label: String,
    },
    /// A calculated-field expression failed dependency resolution.
    #[error(transparent)]
    ExpressionCompile(#[from] ExpressionCompileError),
    /// Randomization is enabled on a schema containing non-field nodes.
    #[error("randomize cannot be used since the schema contains '{class}' nodes")]
    RandomizeWithBranches {
        /// Wire name of the offending node.
        class: String,
    },
    /// The serialized schema could not be materialized.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
