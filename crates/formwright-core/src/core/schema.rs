// crates/formwright-core/src/core/schema.rs
// ============================================================================
// Module: Schema Loader and Registry
// Description: Discriminated dispatch from serialized node records to typed
//              variants, and the reverse serialization.
// Purpose: Materialize the typed tree from JSON with O(1) tag dispatch and a
//          centrally auditable variant list.
// Dependencies: serde, serde_json, tracing,
//               crate::core::{conditions, errors, fields, identifiers,
//               layouts, variables}
// ============================================================================

//! ## Overview
//! Every serialized node carries two discriminators: `_cls_base` names its
//! category (field, condition, layout) and `_cls` its concrete variant. The
//! loader resolves both through a static registry populated once at process
//! start and read-only thereafter; an unknown tag is fatal
//! ([`SchemaError::InvalidFormClass`]) with no fallback dispatch. Nodes are
//! validated as they are constructed, so an impossible configuration never
//! materializes, and the tree is rebuilt from JSON on every load/validate/
//! save cycle rather than mutated in place.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use serde::Serialize;
use serde::de;
use serde::ser;
use serde_json::Map;
use serde_json::Value;

use crate::core::conditions::Condition;
use crate::core::conditions::ConditionKind;
use crate::core::errors::LayoutDefinitionError;
use crate::core::errors::SchemaError;
use crate::core::fields::FormField;
use crate::core::identifiers::NodeId;
use crate::core::layouts::Layout;
use crate::core::layouts::LayoutChild;
use crate::core::variables::CalculatedField;
use crate::core::variables::Constant;

// ============================================================================
// SECTION: Wire Constants
// ============================================================================

/// Maximum supported nesting depth for the node tree.
pub const MAX_SCHEMA_DEPTH: usize = 32;

/// Wire key naming a node's concrete variant.
const CLS_KEY: &str = "_cls";
/// Wire key naming a node's base category.
const CLS_BASE_KEY: &str = "_cls_base";

/// Base-category tag for field nodes.
pub const FIELD_BASE: &str = "BasicFormField";
/// Base-category tag for condition nodes.
pub const CONDITION_BASE: &str = "BaseCondition";
/// Base-category tag for layout nodes.
pub const LAYOUT_BASE: &str = "BaseLayout";

/// Every registered field variant tag. This list is the closed union; adding
/// a field variant means adding its tag here and its payload in `fields.rs`.
const FIELD_CLASSES: &[&str] = &[
    "TextFormField",
    "EmailFormField",
    "PasswordFormField",
    "TextAreaFormField",
    "NumberFormField",
    "DecimalFormField",
    "DateFormField",
    "TimeFormField",
    "DateTimeFormField",
    "BinaryFormField",
    "MCSSFormField",
    "MCMSFormField",
    "RatingFormField",
];

// ============================================================================
// SECTION: Form Node
// ============================================================================

/// A node of the schema tree: field, condition, or layout.
///
/// # Invariants
/// - The union is closed; dispatch from serialized records goes through the
///   registry, never through trial construction.
#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    /// A question slot.
    Field(FormField),
    /// A branching node.
    Condition(Condition),
    /// A section grouping.
    Layout(Layout),
}

impl FormNode {
    /// Returns the stable `_cls` wire tag of this node.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Field(field) => field.class_name(),
            Self::Condition(condition) => condition.class_name(),
            Self::Layout(layout) => layout.class_name(),
        }
    }

    /// Returns the stable `_cls_base` category tag of this node.
    #[must_use]
    pub const fn base_class(&self) -> &'static str {
        match self {
            Self::Field(_) => FIELD_BASE,
            Self::Condition(_) => CONDITION_BASE,
            Self::Layout(_) => LAYOUT_BASE,
        }
    }

    /// Serializes this node into its wire record, discriminators included.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] when serialization fails; this
    /// indicates a bug rather than bad input.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        match self {
            Self::Field(field) => field_to_value(field),
            Self::Condition(condition) => condition_to_value(condition),
            Self::Layout(layout) => layout_to_value(layout),
        }
    }
}

impl Serialize for FormNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        self.to_value().map_err(ser::Error::custom)?.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        load_node(&value).map_err(de::Error::custom)
    }
}

// ============================================================================
// SECTION: Node Registry
// ============================================================================

/// Typed decode function registered per variant tag.
type NodeDecoder = fn(&Map<String, Value>, usize) -> Result<FormNode, SchemaError>;

/// Static registry mapping `_cls` tags to decoders, partitioned by
/// `_cls_base` category.
///
/// # Invariants
/// - Populated once at process start and read-only thereafter; concurrent
///   loads share it without locking.
struct NodeRegistry {
    /// Field variant decoders.
    fields: BTreeMap<&'static str, NodeDecoder>,
    /// Condition variant decoders.
    conditions: BTreeMap<&'static str, NodeDecoder>,
    /// Layout variant decoders.
    layouts: BTreeMap<&'static str, NodeDecoder>,
}

impl NodeRegistry {
    /// Resolves the decoder for a base/variant tag pair.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidFormClass`] when either tag is unknown.
    fn decoder(&self, base: &str, class: &str) -> Result<NodeDecoder, SchemaError> {
        let partition = match base {
            FIELD_BASE => &self.fields,
            CONDITION_BASE => &self.conditions,
            LAYOUT_BASE => &self.layouts,
            _ => {
                return Err(SchemaError::InvalidFormClass {
                    class: base.to_string(),
                });
            }
        };
        partition.get(class).copied().ok_or_else(|| SchemaError::InvalidFormClass {
            class: class.to_string(),
        })
    }
}

/// The process-wide registry instance.
static REGISTRY: LazyLock<NodeRegistry> = LazyLock::new(|| {
    let mut fields: BTreeMap<&'static str, NodeDecoder> = BTreeMap::new();
    for class in FIELD_CLASSES.iter().copied() {
        fields.insert(class, decode_field);
    }

    let mut conditions: BTreeMap<&'static str, NodeDecoder> = BTreeMap::new();
    conditions.insert("BinaryCondition", decode_binary_condition);
    conditions.insert("SwitchCondition", decode_switch_condition);

    let mut layouts: BTreeMap<&'static str, NodeDecoder> = BTreeMap::new();
    layouts.insert("SectionLayout", decode_section_layout);

    NodeRegistry {
        fields,
        conditions,
        layouts,
    }
});

// ============================================================================
// SECTION: Wire Records
// ============================================================================

/// Default `true` for flags that start enabled.
const fn default_true() -> bool {
    true
}

/// Condition wire record, branch keys excluded.
#[derive(Serialize, Deserialize)]
struct ConditionRecord {
    /// Stable node identifier; generated when the record carries none.
    #[serde(rename = "_id", default = "NodeId::generate")]
    id: NodeId,
    /// Optional editor-facing name.
    #[serde(default)]
    name: Option<String>,
    /// Condition expression.
    expression: String,
    /// Editor flag: raw expression editing.
    #[serde(default)]
    is_advance: bool,
    /// Editor flag: expression locked in the designer.
    #[serde(default)]
    lock_expression: bool,
    /// Whether branch evaluation waits for non-null variables.
    #[serde(default)]
    validate_expr_var: bool,
    /// Author notes.
    #[serde(default)]
    user_notes: Option<String>,
}

impl ConditionRecord {
    /// Builds the wire record for an existing condition.
    fn of(condition: &Condition) -> Self {
        Self {
            id: condition.id.clone(),
            name: condition.name.clone(),
            expression: condition.expression.clone(),
            is_advance: condition.is_advance,
            lock_expression: condition.lock_expression,
            validate_expr_var: condition.validate_expr_var,
            user_notes: condition.user_notes.clone(),
        }
    }
}

/// Layout wire record, children excluded.
#[derive(Serialize, Deserialize)]
struct LayoutRecord {
    /// Stable node identifier; generated when the record carries none.
    #[serde(rename = "_id", default = "NodeId::generate")]
    id: NodeId,
    /// Optional section title.
    #[serde(default)]
    title: Option<String>,
    /// Whether the section is outlined when rendered.
    #[serde(default = "default_true")]
    highlight_layout: bool,
}

impl LayoutRecord {
    /// Builds the wire record for an existing layout.
    fn of(layout: &Layout) -> Self {
        Self {
            id: layout.id.clone(),
            title: layout.title.clone(),
            highlight_layout: layout.highlight_layout,
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Materializes a single node from its serialized record.
///
/// # Errors
///
/// Returns [`SchemaError`] for unknown discriminators, malformed records,
/// excessive nesting, or construction validation failures.
pub fn load_node(value: &Value) -> Result<FormNode, SchemaError> {
    load_node_at(value, 0)
}

/// Materializes a top-level schema array in document order.
///
/// # Errors
///
/// Returns [`SchemaError`] on the first node that fails to load.
pub fn load_schema(value: &Value) -> Result<Vec<FormNode>, SchemaError> {
    let records = value.as_array().ok_or_else(|| {
        malformed("form schema must be an array of node records")
    })?;
    let nodes: Vec<FormNode> = records.iter().map(load_node).collect::<Result<_, _>>()?;
    tracing::trace!(nodes = nodes.len(), "loaded form schema");
    Ok(nodes)
}

/// Materializes a schema from JSON text.
///
/// # Errors
///
/// Returns [`SchemaError`] when the text is not valid JSON or a node fails
/// to load.
pub fn load_schema_json(text: &str) -> Result<Vec<FormNode>, SchemaError> {
    let value: Value = serde_json::from_str(text).map_err(|err| malformed(err.to_string()))?;
    load_schema(&value)
}

/// Materializes the constants array in declaration order.
///
/// # Errors
///
/// Returns [`SchemaError`] when a record is malformed or fails construction
/// validation.
pub fn load_constants(value: &Value) -> Result<Vec<Constant>, SchemaError> {
    let records = value.as_array().ok_or_else(|| {
        malformed("constants must be an array of records")
    })?;
    records
        .iter()
        .map(|record| {
            let constant: Constant = serde_json::from_value(record.clone())
                .map_err(|err| malformed(err.to_string()))?;
            constant.validate_definition()?;
            Ok(constant)
        })
        .collect()
}

/// Materializes the calculated-fields array in declaration order.
///
/// # Errors
///
/// Returns [`SchemaError`] when a record is malformed, fails construction
/// validation, or references another calculated field.
pub fn load_calculated_fields(value: &Value) -> Result<Vec<CalculatedField>, SchemaError> {
    let records = value.as_array().ok_or_else(|| {
        malformed("calculated fields must be an array of records")
    })?;
    records
        .iter()
        .map(|record| {
            let field: CalculatedField = serde_json::from_value(record.clone())
                .map_err(|err| malformed(err.to_string()))?;
            field.validate_definition()?;
            field.check_expression()?;
            Ok(field)
        })
        .collect()
}

/// Dispatches one node record through the registry at the given depth.
fn load_node_at(value: &Value, depth: usize) -> Result<FormNode, SchemaError> {
    ensure_depth(depth)?;
    let object = value.as_object().ok_or_else(|| malformed("node record must be an object"))?;
    let base = discriminator(object, CLS_BASE_KEY)?;
    let class = discriminator(object, CLS_KEY)?;
    let decoder = REGISTRY.decoder(base, class)?;
    decoder(object, depth)
}

/// Decodes any field variant; serde resolves the payload from the `_cls`
/// tag already verified by the registry.
fn decode_field(object: &Map<String, Value>, _depth: usize) -> Result<FormNode, SchemaError> {
    let field: FormField = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|err| malformed(err.to_string()))?;
    field.validate_definition()?;
    Ok(FormNode::Field(field))
}

/// Decodes a binary condition and its branches.
fn decode_binary_condition(
    object: &Map<String, Value>,
    depth: usize,
) -> Result<FormNode, SchemaError> {
    let record: ConditionRecord = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|err| malformed(err.to_string()))?;
    let true_branch = match object.get("true_branch") {
        Some(branch) if !branch.is_null() => load_layout(branch, depth + 1)?,
        _ => return Err(malformed("'true_branch' is required for BinaryCondition")),
    };
    let false_branch = optional_layout(object.get("false_branch"), depth)?;
    finish_condition(
        record,
        ConditionKind::Binary {
            true_branch,
            false_branch,
        },
    )
}

/// Decodes a switch condition, its case branches, and its default branch.
fn decode_switch_condition(
    object: &Map<String, Value>,
    depth: usize,
) -> Result<FormNode, SchemaError> {
    let record: ConditionRecord = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|err| malformed(err.to_string()))?;
    let list_cases = object
        .get("list_cases")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("'list_cases' is required for SwitchCondition"))?
        .clone();
    let branch_records = object
        .get("list_branches")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("'list_branches' is required for SwitchCondition"))?;
    let list_branches: Vec<Layout> = branch_records
        .iter()
        .map(|branch| load_layout(branch, depth + 1))
        .collect::<Result<_, _>>()?;
    let use_default = object.get("use_default").and_then(Value::as_bool).unwrap_or(false);
    let default_branch = optional_layout(object.get("default_branch"), depth)?;
    finish_condition(
        record,
        ConditionKind::Switch {
            list_cases,
            list_branches,
            use_default,
            default_branch,
        },
    )
}

/// Assembles and validates a condition from its record and branch structure.
fn finish_condition(record: ConditionRecord, kind: ConditionKind) -> Result<FormNode, SchemaError> {
    let condition = Condition {
        id: record.id,
        name: record.name,
        expression: record.expression,
        is_advance: record.is_advance,
        lock_expression: record.lock_expression,
        validate_expr_var: record.validate_expr_var,
        user_notes: record.user_notes,
        kind,
    };
    condition.validate_definition()?;
    Ok(FormNode::Condition(condition))
}

/// Decodes a section layout reached through top-level dispatch.
fn decode_section_layout(
    object: &Map<String, Value>,
    depth: usize,
) -> Result<FormNode, SchemaError> {
    load_layout_object(object, depth).map(FormNode::Layout)
}

/// Decodes a layout record reached through a condition branch.
fn load_layout(value: &Value, depth: usize) -> Result<Layout, SchemaError> {
    ensure_depth(depth)?;
    let object = value.as_object().ok_or_else(|| malformed("layout record must be an object"))?;
    let class = discriminator(object, CLS_KEY)?;
    if !REGISTRY.layouts.contains_key(class) {
        return Err(SchemaError::InvalidFormClass {
            class: class.to_string(),
        });
    }
    load_layout_object(object, depth)
}

/// Decodes a layout's record and children.
fn load_layout_object(object: &Map<String, Value>, depth: usize) -> Result<Layout, SchemaError> {
    let record: LayoutRecord = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|err| malformed(err.to_string()))?;
    let child_records = object
        .get("children")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("'children' is required for SectionLayout"))?;

    let mut children = Vec::with_capacity(child_records.len());
    for child in child_records {
        match load_node_at(child, depth + 1)? {
            FormNode::Field(field) => children.push(LayoutChild::Field(field)),
            FormNode::Condition(condition) => children.push(LayoutChild::Condition(condition)),
            FormNode::Layout(layout) => {
                return Err(LayoutDefinitionError::NestedLayout {
                    class: layout.class_name().to_string(),
                }
                .into());
            }
        }
    }

    Ok(Layout {
        id: record.id,
        title: record.title,
        highlight_layout: record.highlight_layout,
        children,
    })
}

/// Resolves an optional branch key: absent and `null` both mean no branch.
fn optional_layout(value: Option<&Value>, depth: usize) -> Result<Option<Layout>, SchemaError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(branch) => load_layout(branch, depth + 1).map(Some),
    }
}

/// Fails when the tree nests deeper than the supported limit.
fn ensure_depth(depth: usize) -> Result<(), SchemaError> {
    if depth >= MAX_SCHEMA_DEPTH {
        return Err(SchemaError::NestingTooDeep {
            max_depth: MAX_SCHEMA_DEPTH,
        });
    }
    Ok(())
}

/// Reads a required string discriminator from a node record.
fn discriminator<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, SchemaError> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingDiscriminator { key })
}

/// Builds a malformed-record error.
fn malformed(detail: impl Into<String>) -> SchemaError {
    SchemaError::Malformed {
        detail: detail.into(),
    }
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes a field with its discriminators.
fn field_to_value(field: &FormField) -> Result<Value, SchemaError> {
    let mut object = to_object(serde_json::to_value(field))?;
    object.insert(CLS_BASE_KEY.to_string(), Value::String(FIELD_BASE.to_string()));
    Ok(Value::Object(object))
}

/// Serializes a condition with its discriminators and branches.
fn condition_to_value(condition: &Condition) -> Result<Value, SchemaError> {
    let mut object = to_object(serde_json::to_value(ConditionRecord::of(condition)))?;
    object.insert(CLS_KEY.to_string(), Value::String(condition.class_name().to_string()));
    object.insert(CLS_BASE_KEY.to_string(), Value::String(CONDITION_BASE.to_string()));

    match &condition.kind {
        ConditionKind::Binary {
            true_branch,
            false_branch,
        } => {
            object.insert("true_branch".to_string(), layout_to_value(true_branch)?);
            object.insert(
                "false_branch".to_string(),
                false_branch.as_ref().map_or(Ok(Value::Null), layout_to_value)?,
            );
        }
        ConditionKind::Switch {
            list_cases,
            list_branches,
            use_default,
            default_branch,
        } => {
            object.insert("list_cases".to_string(), Value::Array(list_cases.clone()));
            let branches: Vec<Value> = list_branches
                .iter()
                .map(layout_to_value)
                .collect::<Result<_, _>>()?;
            object.insert("list_branches".to_string(), Value::Array(branches));
            object.insert("use_default".to_string(), Value::Bool(*use_default));
            object.insert(
                "default_branch".to_string(),
                default_branch.as_ref().map_or(Ok(Value::Null), layout_to_value)?,
            );
        }
    }

    Ok(Value::Object(object))
}

/// Serializes a layout with its discriminators and children.
fn layout_to_value(layout: &Layout) -> Result<Value, SchemaError> {
    let mut object = to_object(serde_json::to_value(LayoutRecord::of(layout)))?;
    object.insert(CLS_KEY.to_string(), Value::String(layout.class_name().to_string()));
    object.insert(CLS_BASE_KEY.to_string(), Value::String(LAYOUT_BASE.to_string()));

    let children: Vec<Value> = layout
        .children
        .iter()
        .map(|child| match child {
            LayoutChild::Field(field) => field_to_value(field),
            LayoutChild::Condition(condition) => condition_to_value(condition),
        })
        .collect::<Result<_, _>>()?;
    object.insert("children".to_string(), Value::Array(children));

    Ok(Value::Object(object))
}

/// Unwraps a serialized record into its object form.
fn to_object(value: Result<Value, serde_json::Error>) -> Result<Map<String, Value>, SchemaError> {
    match value {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(malformed("node record serialized to a non-object")),
        Err(err) => Err(malformed(err.to_string())),
    }
}

// ============================================================================
// SECTION: Form Payload
// ============================================================================

/// The top-level serialized form: schema, constants, and calculated fields
/// as three parallel arrays.
///
/// # Invariants
/// - Declaration order is preserved; the validator depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPayload {
    /// The node tree, in document order.
    pub schema: Vec<FormNode>,
    /// Constants, in declaration order.
    pub constants: Vec<Constant>,
    /// Calculated fields, in declaration order.
    pub calculated_fields: Vec<CalculatedField>,
}

impl FormPayload {
    /// Materializes the payload from its serialized form. Absent or `null`
    /// arrays load as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] on the first record that fails to load.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let object = value.as_object().ok_or_else(|| malformed("form payload must be an object"))?;
        let schema = match object.get("schema") {
            None | Some(Value::Null) => Vec::new(),
            Some(schema) => load_schema(schema)?,
        };
        let constants = match object.get("constants") {
            None | Some(Value::Null) => Vec::new(),
            Some(constants) => load_constants(constants)?,
        };
        let calculated_fields = match object.get("calculated_fields") {
            None | Some(Value::Null) => Vec::new(),
            Some(fields) => load_calculated_fields(fields)?,
        };
        Ok(Self {
            schema,
            constants,
            calculated_fields,
        })
    }

    /// Serializes the payload back into its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] when serialization fails; this
    /// indicates a bug rather than bad input.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        let schema: Vec<Value> = self
            .schema
            .iter()
            .map(FormNode::to_value)
            .collect::<Result<_, _>>()?;
        let constants =
            serde_json::to_value(&self.constants).map_err(|err| malformed(err.to_string()))?;
        let calculated_fields = serde_json::to_value(&self.calculated_fields)
            .map_err(|err| malformed(err.to_string()))?;
        Ok(serde_json::json!({
            "schema": schema,
            "constants": constants,
            "calculated_fields": calculated_fields,
        }))
    }
}
