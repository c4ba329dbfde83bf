// crates/formwright-core/src/core/layouts.rs
// ============================================================================
// Module: Layout Variant
// Description: Ordered container of fields and conditions.
// Purpose: Group questions into sections without carrying validation logic.
// Dependencies: crate::core::{conditions, fields, identifiers}
// ============================================================================

//! ## Overview
//! A layout is purely structural: an ordered list of fields and conditions
//! under an optional section title. A layout never directly contains another
//! layout; nesting only happens through a condition's branches, which the
//! [`LayoutChild`] type makes unrepresentable. Validity of the children is
//! the form validator's responsibility.

use crate::core::conditions::Condition;
use crate::core::fields::FormField;
use crate::core::identifiers::NodeId;

// ============================================================================
// SECTION: Layout
// ============================================================================

/// An ordered grouping of fields and conditions (`_cls` = `SectionLayout`).
///
/// # Invariants
/// - `id` is stable across load/save cycles; generated once, preserved
///   thereafter.
/// - Children keep document order; the validator walks them as declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Stable node identifier (wire key `_id`).
    pub id: NodeId,
    /// Optional section title; untitled sections render without a heading.
    pub title: Option<String>,
    /// Whether the section is outlined when rendered.
    pub highlight_layout: bool,
    /// Ordered children.
    pub children: Vec<LayoutChild>,
}

impl Layout {
    /// Returns the stable `_cls` wire tag of this layout.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        "SectionLayout"
    }
}

/// A node that may appear directly inside a layout.
///
/// # Invariants
/// - Layouts are excluded by construction; the loader rejects a directly
///   nested layout with a `LayoutDefinitionError`.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutChild {
    /// A question slot.
    Field(FormField),
    /// A nested branching node.
    Condition(Condition),
}

impl LayoutChild {
    /// Returns the stable `_cls` wire tag of the child.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Field(field) => field.class_name(),
            Self::Condition(condition) => condition.class_name(),
        }
    }
}
