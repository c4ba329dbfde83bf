// crates/expr-scan/src/lib.rs
// ============================================================================
// Module: Expression Scan Library
// Description: Lexical dependency analysis for JS-like form expressions.
// Purpose: Extract identifier references from untrusted expression text
//          without evaluating it.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! Expression Scan extracts identifier-like tokens from JS-like expression
//! strings so callers can resolve which variables an expression depends on.
//! It is a best-effort lexical scan, not a parser: tokens inside string
//! literals and reserved words are reported alongside real references. The
//! scan never evaluates the input and is bounded by an input size limit.
//!
//! Security posture: expression text is untrusted author input; scanning is
//! size-limited and allocation is proportional to the number of matches.

mod guard;
mod scan;
mod scope;

pub use guard::null_guard;
pub use scan::MAX_EXPRESSION_BYTES;
pub use scan::extract_variables;
pub use scope::Scope;
pub use scope::strip_scope_prefixes;
