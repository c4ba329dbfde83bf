// crates/formwright-core/src/lib.rs
// ============================================================================
// Module: Formwright Core Library
// Description: Form-schema object model, polymorphic serialization, and
//              whole-schema validation.
// Purpose: Let non-programmers' declarative forms be materialized and
//          checked before they are ever published.
// Dependencies: crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Formwright Core models data-collection forms as a discriminated tree of
//! fields, conditions, and layouts, plus constants and calculated fields
//! sharing the same label namespace. The tree is rebuilt from serialized
//! JSON on every load/validate/save cycle; the validator then enforces every
//! cross-entity invariant in one deterministic pass and emits the set of
//! translation identifiers for the external translation store.
//!
//! Persistence, rendering, authentication, and translation content are
//! external collaborators: the engine never performs I/O and expressions are
//! analyzed for variable references, never executed.

pub mod core;
pub mod runtime;

pub use crate::core::CalculatedField;
pub use crate::core::Choice;
pub use crate::core::ChoiceOrder;
pub use crate::core::ChoiceType;
pub use crate::core::Condition;
pub use crate::core::ConditionDefinitionError;
pub use crate::core::ConditionKind;
pub use crate::core::Constant;
pub use crate::core::ExpressionCompileError;
pub use crate::core::FieldDefinitionError;
pub use crate::core::FieldKind;
pub use crate::core::FieldLabel;
pub use crate::core::FieldMeta;
pub use crate::core::FieldValueError;
pub use crate::core::FormField;
pub use crate::core::FormNode;
pub use crate::core::FormPayload;
pub use crate::core::InvalidCalculatedFieldExpression;
pub use crate::core::Layout;
pub use crate::core::LayoutChild;
pub use crate::core::LayoutDefinitionError;
pub use crate::core::NodeId;
pub use crate::core::SchemaError;
pub use crate::core::TranslationId;
pub use crate::core::ValidationError;
pub use crate::core::VariableDefinitionError;
pub use crate::core::Widget;
pub use crate::core::schema::load_calculated_fields;
pub use crate::core::schema::load_constants;
pub use crate::core::schema::load_node;
pub use crate::core::schema::load_schema;
pub use crate::core::schema::load_schema_json;
