// crates/expr-scan/src/scope.rs
// ============================================================================
// Module: Variable Scopes
// Description: Scope prefixes used by form expressions.
// Purpose: Classify and strip the namespace prefix of an extracted variable.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Form expressions reference variables through scope prefixes: `data.` for
//! answered fields, `constants.` for form constants, and
//! `calculated_fields.` for derived values. Renderer-side code may
//! additionally route everything through a `$scope.` prefix; stripping
//! removes that wrapper first.

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Renderer-side wrapper prefix stripped before scope classification.
const WRAPPER_PREFIX: &str = "$scope.";

/// Variable scopes recognized in form expressions.
///
/// # Invariants
/// - Prefix strings are stable; they are part of the authored expression
///   surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Answered form fields (`data.`).
    Data,
    /// Form constants (`constants.`).
    Constants,
    /// Derived values (`calculated_fields.`).
    CalculatedFields,
}

impl Scope {
    /// Returns the scope's expression prefix, including the trailing dot.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Data => "data.",
            Self::Constants => "constants.",
            Self::CalculatedFields => "calculated_fields.",
        }
    }

    /// Reports whether `variable` references this scope.
    #[must_use]
    pub fn matches(self, variable: &str) -> bool {
        variable
            .strip_prefix(WRAPPER_PREFIX)
            .unwrap_or(variable)
            .starts_with(self.prefix())
    }
}

/// Strips the `$scope.` wrapper and any single scope prefix from `variable`,
/// returning the bare name used for registry lookups.
#[must_use]
pub fn strip_scope_prefixes(variable: &str) -> &str {
    let unwrapped = variable.strip_prefix(WRAPPER_PREFIX).unwrap_or(variable);
    for scope in [Scope::Data, Scope::Constants, Scope::CalculatedFields] {
        if let Some(bare) = unwrapped.strip_prefix(scope.prefix()) {
            return bare;
        }
    }
    unwrapped
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
    use super::Scope;
    use super::strip_scope_prefixes;

    #[test]
    fn strips_wrapper_and_scope() {
        assert_eq!(strip_scope_prefixes("$scope.data.score"), "score");
        assert_eq!(strip_scope_prefixes("data.score"), "score");
        assert_eq!(strip_scope_prefixes("constants.base"), "base");
        assert_eq!(strip_scope_prefixes("score"), "score");
    }

    #[test]
    fn scope_matching_sees_through_wrapper() {
        assert!(Scope::Data.matches("$scope.data.score"));
        assert!(Scope::CalculatedFields.matches("calculated_fields.bonus"));
        assert!(!Scope::Constants.matches("data.score"));
    }
}
