// crates/formwright-core/src/runtime/validator.rs
// ============================================================================
// Module: Form Validator
// Description: Single-pass whole-schema validation and translation
//              collection.
// Purpose: Enforce every cross-entity invariant before a form is persisted.
// Dependencies: expr-scan, tracing,
//               crate::core::{conditions, errors, fields, identifiers,
//               layouts, schema, variables}
// ============================================================================

//! ## Overview
//! The validator is the orchestrator: it walks constants, the node tree, and
//! calculated fields in that fixed order, enforcing label uniqueness,
//! randomization compatibility, and expression-reference integrity while
//! collecting every translation identifier the form uses. Declaration order
//! is the sole dependency rule; a calculated field may only reference labels
//! registered before it. The walk stops at the first violated invariant --
//! a form is either fully valid or rejected with one typed error.
//!
//! The pass is pure and deterministic: no I/O, no shared mutable state, and
//! identical inputs always yield the identical translation set or error.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use expr_scan::Scope;
use expr_scan::strip_scope_prefixes;

use crate::core::conditions::Condition;
use crate::core::conditions::ConditionKind;
use crate::core::errors::ExpressionCompileError;
use crate::core::errors::ValidationError;
use crate::core::fields::FormField;
use crate::core::identifiers::TranslationId;
use crate::core::layouts::Layout;
use crate::core::layouts::LayoutChild;
use crate::core::schema::FormNode;
use crate::core::schema::FormPayload;
use crate::core::variables::CalculatedField;
use crate::core::variables::Constant;

// ============================================================================
// SECTION: Options and Output
// ============================================================================

/// Deduplicated, deterministically ordered set of translation identifiers.
pub type TranslationSet = BTreeSet<TranslationId>;

/// Form-level settings that influence validation.
///
/// # Invariants
/// - `randomize` demands a flat, field-only schema.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Whether the owning form shuffles field order at render time.
    pub randomize: bool,
    /// Optional translation reference for the form description.
    pub description: Option<TranslationId>,
    /// Optional translation reference for the form instructions.
    pub instructions: Option<TranslationId>,
}

// ============================================================================
// SECTION: Label Registry
// ============================================================================

/// Ordered registry of every label declared so far.
///
/// # Invariants
/// - Insertion order is declaration order; lookups never reorder.
#[derive(Debug, Default)]
struct LabelRegistry {
    /// Labels in declaration order.
    ordered: Vec<String>,
}

impl LabelRegistry {
    /// Registers a label, rejecting collisions.
    fn push(&mut self, label: &str) -> Result<(), ValidationError> {
        if self.contains(label) {
            return Err(ValidationError::DuplicateVariableName {
                label: label.to_string(),
            });
        }
        self.ordered.push(label.to_string());
        Ok(())
    }

    /// Reports whether a label has been registered.
    fn contains(&self, label: &str) -> bool {
        self.ordered.iter().any(|known| known == label)
    }
}

// ============================================================================
// SECTION: Form Validator
// ============================================================================

/// Whole-form validator.
///
/// Invoked once per save/publish action by the owning form; concurrent
/// callers construct independent validators over independent trees.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    /// Form-level settings for this pass.
    options: ValidationOptions,
}

impl FormValidator {
    /// Creates a validator with the given form-level options.
    #[must_use]
    pub const fn new(options: ValidationOptions) -> Self {
        Self {
            options,
        }
    }

    /// Validates a complete payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] on the first violated invariant.
    pub fn validate_payload(&self, payload: &FormPayload) -> Result<TranslationSet, ValidationError> {
        self.validate(&payload.schema, &payload.constants, &payload.calculated_fields)
    }

    /// Validates the schema tree, constants, and calculated fields, returning
    /// the deduplicated translation identifiers the form uses.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] on the first violated invariant.
    pub fn validate(
        &self,
        schema: &[FormNode],
        constants: &[Constant],
        calculated_fields: &[CalculatedField],
    ) -> Result<TranslationSet, ValidationError> {
        let mut translations = TranslationSet::new();
        if let Some(description) = &self.options.description {
            translations.insert(description.clone());
        }
        if let Some(instructions) = &self.options.instructions {
            translations.insert(instructions.clone());
        }

        let mut registry = LabelRegistry::default();
        // Field label -> required flag, for calculated-field compilation.
        let mut field_lookup: BTreeMap<String, bool> = BTreeMap::new();

        for constant in constants {
            registry.push(constant.label.as_str())?;
            if let Some(id) = &constant.text_translation_id {
                translations.insert(id.clone());
            }
        }
        tracing::debug!(constants = constants.len(), "registered form constants");

        for node in schema {
            walk_node(node, &mut |field| {
                registry.push(field.meta.label.as_str())?;
                field_lookup.insert(field.meta.label.to_string(), field.meta.required);
                translations.extend(field.translation_ids());
                Ok::<(), ValidationError>(())
            })?;
        }
        tracing::debug!(
            fields = field_lookup.len(),
            translations = translations.len(),
            "walked form schema"
        );

        if self.options.randomize
            && let Some(node) = schema.iter().find(|node| !matches!(node, FormNode::Field(_)))
        {
            return Err(ValidationError::RandomizeWithBranches {
                class: node.class_name().to_string(),
            });
        }

        for calculated in calculated_fields {
            registry.push(calculated.label.as_str())?;
            if let Some(id) = &calculated.text_translation_id {
                translations.insert(id.clone());
            }
            compile_expression(calculated, &registry, &field_lookup)?;
        }
        tracing::debug!(
            calculated_fields = calculated_fields.len(),
            "compiled calculated fields"
        );

        Ok(translations)
    }
}

// ============================================================================
// SECTION: Expression Compilation
// ============================================================================

/// Resolves every variable of a calculated field against the labels
/// registered so far.
fn compile_expression(
    calculated: &CalculatedField,
    registry: &LabelRegistry,
    field_lookup: &BTreeMap<String, bool>,
) -> Result<(), ExpressionCompileError> {
    for variable in calculated.expression_variables() {
        let bare = strip_scope_prefixes(&variable);
        if !registry.contains(bare) {
            return Err(ExpressionCompileError::UndefinedVariable {
                variable: bare.to_string(),
                calculated_field: calculated.label.to_string(),
            });
        }
        if Scope::Data.matches(&variable) {
            match field_lookup.get(bare) {
                Some(true) => {}
                Some(false) => {
                    return Err(ExpressionCompileError::OptionalFieldReference {
                        field: bare.to_string(),
                        calculated_field: calculated.label.to_string(),
                    });
                }
                // `data.`-scoped but registered as a constant or calculated
                // field: no such field exists.
                None => {
                    return Err(ExpressionCompileError::UndefinedVariable {
                        variable: bare.to_string(),
                        calculated_field: calculated.label.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tree Walk
// ============================================================================

/// Visits every field under `node` in document order.
fn walk_node<E>(
    node: &FormNode,
    visit: &mut impl FnMut(&FormField) -> Result<(), E>,
) -> Result<(), E> {
    match node {
        FormNode::Field(field) => visit(field),
        FormNode::Condition(condition) => walk_condition(condition, visit),
        FormNode::Layout(layout) => walk_layout(layout, visit),
    }
}

/// Visits a condition's branches: true before false, cases before default.
fn walk_condition<E>(
    condition: &Condition,
    visit: &mut impl FnMut(&FormField) -> Result<(), E>,
) -> Result<(), E> {
    match &condition.kind {
        ConditionKind::Binary {
            true_branch,
            false_branch,
        } => {
            walk_layout(true_branch, visit)?;
            if let Some(branch) = false_branch {
                walk_layout(branch, visit)?;
            }
            Ok(())
        }
        ConditionKind::Switch {
            list_branches,
            use_default,
            default_branch,
            ..
        } => {
            for branch in list_branches {
                walk_layout(branch, visit)?;
            }
            if *use_default && let Some(branch) = default_branch {
                walk_layout(branch, visit)?;
            }
            Ok(())
        }
    }
}

/// Visits a layout's children in declaration order.
fn walk_layout<E>(
    layout: &Layout,
    visit: &mut impl FnMut(&FormField) -> Result<(), E>,
) -> Result<(), E> {
    for child in &layout.children {
        match child {
            LayoutChild::Field(field) => visit(field)?,
            LayoutChild::Condition(condition) => walk_condition(condition, visit)?,
        }
    }
    Ok(())
}
