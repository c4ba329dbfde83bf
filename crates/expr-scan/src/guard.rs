// crates/expr-scan/src/guard.rs
// ============================================================================
// Module: Null-Guard Synthesis
// Description: Builds the not-null guard expression for a variable list.
// Purpose: Let renderers skip branch evaluation while referenced variables
//          are still unanswered.
// Dependencies: crate::scope
// ============================================================================

//! ## Overview
//! A condition whose `validate_expr_var` flag is set is only evaluated once
//! every `data.*`/`constants.*` variable it references is non-null. The guard
//! produced here is the JS-like expression the renderer evaluates to make
//! that call: `!(data.a == null || constants.b == null)`.

use crate::scope::Scope;

// ============================================================================
// SECTION: Guard Builder
// ============================================================================

/// Builds a not-null guard over the `data.*`/`constants.*` members of
/// `variables`.
///
/// Returns `None` when no variable references either scope; there is nothing
/// to guard and the renderer may evaluate the expression directly.
#[must_use]
pub fn null_guard(variables: &[String]) -> Option<String> {
    let checks: Vec<String> = variables
        .iter()
        .filter(|var| Scope::Data.matches(var) || Scope::Constants.matches(var))
        .map(|var| format!("{var} == null"))
        .collect();

    if checks.is_empty() {
        return None;
    }
    Some(format!("!({})", checks.join(" || ")))
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
    use super::null_guard;

    #[test]
    fn guards_data_and_constant_references() {
        let vars = vec!["data.age".to_string(), "constants.cutoff".to_string()];
        assert_eq!(
            null_guard(&vars).as_deref(),
            Some("!(data.age == null || constants.cutoff == null)")
        );
    }

    #[test]
    fn skips_unscoped_tokens() {
        let vars = vec!["Math.round".to_string(), "data.age".to_string()];
        assert_eq!(null_guard(&vars).as_deref(), Some("!(data.age == null)"));
    }

    #[test]
    fn empty_when_nothing_is_scoped() {
        let vars = vec!["Math.round".to_string()];
        assert!(null_guard(&vars).is_none());
    }
}
