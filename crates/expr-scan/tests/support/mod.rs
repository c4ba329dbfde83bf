// crates/expr-scan/tests/support/mod.rs
// ============================================================================
// Module: Expression Scan Test Support
// Description: Shared helpers for expr-scan integration tests.
// Purpose: Provide a uniform result alias and condition helper.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Shared assertion helpers for expr-scan integration tests.

/// Result alias used by every integration test.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Fails the test with `message` when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(message.into().into())
    }
}
