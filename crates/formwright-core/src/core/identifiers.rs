// crates/formwright-core/src/core/identifiers.rs
// ============================================================================
// Module: Formwright Identifiers
// Description: Canonical opaque identifiers for form schema nodes.
// Purpose: Provide strongly typed, serializable identifiers with stable wire
//          forms.
// Dependencies: regex, serde, uuid
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout the form schema.
//! Condition and Layout nodes carry a generated [`NodeId`] so editors can
//! reference them stably across edits; Fields and Variables are identified by
//! their author-given [`FieldLabel`]. [`TranslationId`] references externally
//! stored text and is never dereferenced by the engine.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::core::errors::FieldDefinitionError;

// ============================================================================
// SECTION: Node Identifier
// ============================================================================

/// Opaque identifier for Condition and Layout nodes (wire key `_id`).
///
/// # Invariants
/// - Opaque UTF-8 string; generated identifiers are UUID v4 but stored ones
///   are preserved verbatim, so no format is assumed on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node identifier from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh identifier for a node that has never been stored.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Translation Identifier
// ============================================================================

/// Opaque reference to language-specific text in the external translation
/// store.
///
/// # Invariants
/// - Opaque UTF-8 string; the engine only collects these, it never resolves
///   their content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationId(String);

impl TranslationId {
    /// Creates a new translation identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Field Label
// ============================================================================

/// Label grammar: letters, digits, and underscores only.
#[allow(clippy::expect_used, reason = "The pattern is a compile-time constant.")]
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("label pattern must compile"));

/// Author-given identity of a Field, Constant, or Calculated Field.
///
/// Labels double as expression variable names, so they follow identifier
/// rules: `[A-Za-z0-9_]+` with no double underscore. The grammar is enforced
/// by [`FieldLabel::validate`], which runs as part of every node's
/// construction validation; the serde representation stays transparent so
/// stored schemas round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLabel(String);

impl FieldLabel {
    /// Creates a label after checking the identifier grammar.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDefinitionError::InvalidLabel`] when the grammar is
    /// violated.
    pub fn new(label: impl Into<String>) -> Result<Self, FieldDefinitionError> {
        let label = Self(label.into());
        label.validate()?;
        Ok(label)
    }

    /// Checks the identifier grammar on an already constructed label.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDefinitionError::InvalidLabel`] when the grammar is
    /// violated.
    pub fn validate(&self) -> Result<(), FieldDefinitionError> {
        if LABEL_PATTERN.is_match(&self.0) && !self.0.contains("__") {
            Ok(())
        } else {
            Err(FieldDefinitionError::InvalidLabel {
                label: self.0.clone(),
            })
        }
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
