// crates/formwright-core/src/core/conditions.rs
// ============================================================================
// Module: Condition Variants
// Description: Branching nodes selecting among layouts based on a JS-like
//              expression.
// Purpose: Hold branch structure and expression text; never evaluate either.
// Dependencies: expr-scan, serde_json,
//               crate::core::{errors, identifiers, layouts}
// ============================================================================

//! ## Overview
//! A condition guards one or more [`Layout`] branches behind an expression
//! the rendering clients evaluate. The engine only checks structure (branch
//! symmetry, default-branch presence) and extracts the expression's variable
//! dependencies; evaluation semantics live entirely in the renderers.

use expr_scan::extract_variables;
use expr_scan::null_guard;
use serde_json::Value;

use crate::core::errors::ConditionDefinitionError;
use crate::core::identifiers::NodeId;
use crate::core::layouts::Layout;

// ============================================================================
// SECTION: Condition
// ============================================================================

/// A branching node selecting among layouts based on an expression.
///
/// # Invariants
/// - `id` is stable across load/save cycles; generated once, preserved
///   thereafter.
/// - The expression is opaque text here; only its variable references are
///   ever inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Stable node identifier (wire key `_id`).
    pub id: NodeId,
    /// Optional editor-facing name.
    pub name: Option<String>,
    /// JS-like boolean/value expression over `data.*`/`constants.*`.
    pub expression: String,
    /// Editor flag: the author writes raw expression code instead of using
    /// the guided builder.
    pub is_advance: bool,
    /// Editor flag: the expression cannot be edited in the form designer.
    pub lock_expression: bool,
    /// Whether branch evaluation waits until every referenced variable is
    /// non-null.
    pub validate_expr_var: bool,
    /// Author notes; never shown to respondents.
    pub user_notes: Option<String>,
    /// Branch structure.
    pub kind: ConditionKind,
}

/// Branch structure of a condition, discriminated by the `_cls` wire tag.
///
/// # Invariants
/// - Wire tags are stable; renaming one invalidates every stored schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    /// Two-way branch on a boolean expression (`_cls` = `BinaryCondition`).
    Binary {
        /// Layout shown when the expression is true.
        true_branch: Layout,
        /// Layout shown when the expression is false; may be absent.
        false_branch: Option<Layout>,
    },
    /// 1-of-N branch on an expression value (`_cls` = `SwitchCondition`).
    Switch {
        /// Case values, parallel to `list_branches`.
        list_cases: Vec<Value>,
        /// Branch layouts, parallel to `list_cases`.
        list_branches: Vec<Layout>,
        /// Whether an unmatched value falls through to the default branch.
        use_default: bool,
        /// Default branch; required when `use_default` is set.
        default_branch: Option<Layout>,
    },
}

impl Condition {
    /// Returns the stable `_cls` wire tag of this condition.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match self.kind {
            ConditionKind::Binary { .. } => "BinaryCondition",
            ConditionKind::Switch { .. } => "SwitchCondition",
        }
    }

    /// Checks the branch structure for malformed configurations.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionDefinitionError`] when switch cases and branches
    /// differ in length, or `use_default` is set without a default branch.
    pub fn validate_definition(&self) -> Result<(), ConditionDefinitionError> {
        match &self.kind {
            ConditionKind::Binary { .. } => Ok(()),
            ConditionKind::Switch {
                list_cases,
                list_branches,
                use_default,
                default_branch,
            } => {
                if list_cases.len() != list_branches.len() {
                    return Err(ConditionDefinitionError::CaseBranchMismatch {
                        cases: list_cases.len(),
                        branches: list_branches.len(),
                    });
                }
                if *use_default && default_branch.is_none() {
                    return Err(ConditionDefinitionError::MissingDefaultBranch);
                }
                Ok(())
            }
        }
    }

    /// Returns the variables referenced by the expression, in order of first
    /// occurrence.
    #[must_use]
    pub fn expression_variables(&self) -> Vec<String> {
        extract_variables(&self.expression)
    }

    /// Derives the not-null guard renderers evaluate before this condition
    /// when `validate_expr_var` is set.
    ///
    /// Returns `None` when the expression references no `data.*`/
    /// `constants.*` variables.
    #[must_use]
    pub fn null_guard_expression(&self) -> Option<String> {
        null_guard(&self.expression_variables())
    }

    /// Returns case/branch pairs in declaration order. Empty for binary
    /// conditions.
    #[must_use]
    pub fn cases(&self) -> Vec<(&Value, &Layout)> {
        match &self.kind {
            ConditionKind::Binary { .. } => Vec::new(),
            ConditionKind::Switch {
                list_cases,
                list_branches,
                ..
            } => list_cases.iter().zip(list_branches.iter()).collect(),
        }
    }
}
