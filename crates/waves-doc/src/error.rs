//! Error types for import, editing and export.

use thiserror::Error;

use crate::validate::{Severity, ValidationIssue};

/// Broad failure categories, one per class of rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed payload or unsupported version; no document was produced.
    ImportFatal,
    /// An entry index did not address an existing wave, ship or incident.
    Index,
    /// A registry rename target already exists.
    RegistryCollision,
    /// A registry id that must exist does not.
    RegistryReference,
    /// A registry id was empty.
    InvalidId,
    /// Free-form JSON text for `options`/`params` failed to parse.
    InlineJson,
    /// A preset name is not in the catalogue.
    UnknownPreset,
    /// Export refused because of error-severity validation issues.
    ValidationBlocked,
    /// The document could not be rendered to JSON.
    Serialize,
}

impl ErrorKind {
    /// Returns a short stable name for the category (e.g., "registry-collision").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::ImportFatal => "import-fatal",
            ErrorKind::Index => "index",
            ErrorKind::RegistryCollision => "registry-collision",
            ErrorKind::RegistryReference => "registry-reference",
            ErrorKind::InvalidId => "invalid-id",
            ErrorKind::InlineJson => "inline-json",
            ErrorKind::UnknownPreset => "unknown-preset",
            ErrorKind::ValidationBlocked => "validation-blocked",
            ErrorKind::Serialize => "serialize",
        }
    }
}

/// Error while turning external JSON into a canonical document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("[import] not valid JSON: {0}")]
    NotJson(String),

    #[error("[import] top-level value must be a JSON object")]
    NotAnObject,

    #[error("[import] unsupported or missing \"version\" (expected 1, found {})", found_text(.found))]
    UnsupportedVersion { found: Option<String> },

    #[error("[import] malformed document: {0}")]
    Malformed(String),
}

fn found_text(found: &Option<String>) -> &str {
    found.as_deref().unwrap_or("nothing")
}

impl ImportError {
    /// Returns the category for this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ImportFatal
    }
}

/// Error from a rejected store operation. The document is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("[index] {collection} index {index} out of bounds (len: {len})")]
    IndexOutOfBounds {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("[registry] affix \"{id}\" already exists")]
    AffixExists { id: String },

    #[error("[registry] behavior \"{id}\" already exists")]
    BehaviorExists { id: String },

    #[error("[registry] affix \"{id}\" not found")]
    MissingAffix { id: String },

    #[error("[registry] behavior \"{id}\" not found")]
    MissingBehavior { id: String },

    #[error("[registry] {registry} id must not be empty")]
    EmptyId { registry: &'static str },

    #[error("[inline] {field} must be a JSON object: {reason}")]
    InlineJson { field: &'static str, reason: String },

    #[error("[preset] unknown preset \"{name}\"")]
    UnknownPreset { name: String },
}

impl EditError {
    /// Returns the category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditError::IndexOutOfBounds { .. } => ErrorKind::Index,
            EditError::AffixExists { .. } | EditError::BehaviorExists { .. } => {
                ErrorKind::RegistryCollision
            }
            EditError::MissingAffix { .. } | EditError::MissingBehavior { .. } => {
                ErrorKind::RegistryReference
            }
            EditError::EmptyId { .. } => ErrorKind::InvalidId,
            EditError::InlineJson { .. } => ErrorKind::InlineJson,
            EditError::UnknownPreset { .. } => ErrorKind::UnknownPreset,
        }
    }

    /// True when a rename target was already taken.
    pub fn is_collision(&self) -> bool {
        self.kind() == ErrorKind::RegistryCollision
    }

    /// True when a registry id that had to exist was absent.
    pub fn is_missing_reference(&self) -> bool {
        self.kind() == ErrorKind::RegistryReference
    }
}

/// Error at the export boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("[export] blocked by {} validation error(s)", blocking_count(.issues))]
    Blocked { issues: Vec<ValidationIssue> },

    #[error("[export] serialization failed: {0}")]
    Serialize(String),
}

fn blocking_count(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|i| i.severity == Severity::Error).count()
}

impl ExportError {
    /// Returns the category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Blocked { .. } => ErrorKind::ValidationBlocked,
            ExportError::Serialize(_) => ErrorKind::Serialize,
        }
    }
}
