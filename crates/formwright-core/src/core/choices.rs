// crates/formwright-core/src/core/choices.rs
// ============================================================================
// Module: Choice Lists
// Description: Choice entries, value typing, and presentation ordering for
//              select-style fields.
// Purpose: Keep choice lists homogeneous and expose deterministic ordering
//          accessors.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Select-style fields declare their options as a list of [`Choice`] entries
//! whose values must all match the declared [`ChoiceType`]. Ordering is a
//! presentation concern: the accessor sorts ascending/descending
//! deterministically and leaves `random` to the renderer, so validation is
//! never influenced by shuffle order.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::errors::FieldDefinitionError;

// ============================================================================
// SECTION: Choice
// ============================================================================

/// A single selectable option: the stored value and the displayed text.
///
/// # Invariants
/// - `value` must match the owning field's declared [`ChoiceType`]; enforced
///   by the field's construction validation, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Value recorded as the answer when this choice is selected.
    pub value: Value,
    /// Text displayed to the user for this choice.
    pub text: String,
}

// ============================================================================
// SECTION: Choice Type
// ============================================================================

/// Declared value type of a choice list.
///
/// # Invariants
/// - Variants are stable for serialization; the set is the MCQ subset of the
///   form data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceType {
    /// Alphanumeric values.
    String,
    /// Integer values.
    Int,
    /// Decimal values.
    Float,
}

impl ChoiceType {
    /// Returns the stable wire form of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
        }
    }

    /// Checks that every choice value matches this type.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDefinitionError::ChoiceValueType`] on the first
    /// mismatching value.
    pub fn check_choices(self, choices: &[Choice]) -> Result<(), FieldDefinitionError> {
        for choice in choices {
            let matches = match self {
                Self::String => choice.value.is_string(),
                Self::Int => choice.value.as_i64().is_some() || choice.value.as_u64().is_some(),
                Self::Float => choice.value.is_f64(),
            };
            if !matches {
                return Err(FieldDefinitionError::ChoiceValueType {
                    value: choice.value.to_string(),
                    expected: self.as_str(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ChoiceType {
    fn default() -> Self {
        Self::String
    }
}

impl fmt::Display for ChoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Choice Ordering
// ============================================================================

/// Presentation order for a choice list.
///
/// # Invariants
/// - Variants are stable for serialization; ordering never affects
///   validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceOrder {
    /// Declaration order.
    Default,
    /// Ascending by value.
    Ascending,
    /// Descending by value.
    Descending,
    /// Shuffled by the renderer at display time.
    Random,
}

impl ChoiceOrder {
    /// Returns `choices` in this presentation order.
    ///
    /// `Random` returns declaration order: shuffling is the renderer's move,
    /// and doing it here would make the engine non-deterministic.
    #[must_use]
    pub fn apply<'a>(self, choices: &'a [Choice]) -> Vec<&'a Choice> {
        let mut ordered: Vec<&Choice> = choices.iter().collect();
        match self {
            Self::Default | Self::Random => {}
            Self::Ascending => ordered.sort_by(|lhs, rhs| compare_values(&lhs.value, &rhs.value)),
            Self::Descending => {
                ordered.sort_by(|lhs, rhs| compare_values(&rhs.value, &lhs.value));
            }
        }
        ordered
    }
}

impl Default for ChoiceOrder {
    fn default() -> Self {
        Self::Default
    }
}

/// Orders two choice values: numbers numerically, everything else by its
/// JSON rendering.
fn compare_values(lhs: &Value, rhs: &Value) -> Ordering {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        _ => lhs.to_string().cmp(&rhs.to_string()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "Test-only output and panic-based assertions are permitted."
)]
mod tests {
    use serde_json::json;

    use super::Choice;
    use super::ChoiceOrder;
    use super::ChoiceType;

    fn choices(values: &[serde_json::Value]) -> Vec<Choice> {
        values
            .iter()
            .map(|value| Choice {
                value: value.clone(),
                text: value.to_string(),
            })
            .collect()
    }

    #[test]
    fn int_choices_reject_strings() {
        let list = choices(&[json!(1), json!("two")]);
        assert!(ChoiceType::Int.check_choices(&list).is_err());
    }

    #[test]
    fn float_choices_reject_integers() {
        let list = choices(&[json!(1.5), json!(2)]);
        assert!(ChoiceType::Float.check_choices(&list).is_err());
    }

    #[test]
    fn ascending_sorts_numbers_numerically() {
        let list = choices(&[json!(10), json!(2), json!(1)]);
        let ordered: Vec<i64> = ChoiceOrder::Ascending
            .apply(&list)
            .iter()
            .filter_map(|choice| choice.value.as_i64())
            .collect();
        assert_eq!(ordered, vec![1, 2, 10]);
    }

    #[test]
    fn random_keeps_declaration_order() {
        let list = choices(&[json!("b"), json!("a")]);
        let ordered: Vec<&str> = ChoiceOrder::Random
            .apply(&list)
            .iter()
            .filter_map(|choice| choice.value.as_str())
            .collect();
        assert_eq!(ordered, vec!["b", "a"]);
    }
}
