//! JSON import/export boundary.
//!
//! Import turns text (or an already-parsed value) into a canonical document,
//! failing as a whole on malformed input. Export normalizes, validates, and
//! renders; it is refused while error-severity issues remain.

use serde_json::Value;
use tracing::{info, warn};

use crate::codec::normalize::{normalize_in, normalize_out};
use crate::error::{ExportError, ImportError};
use crate::model::{FORMAT_VERSION, WavesDoc, WavesFile};
use crate::validate::{has_blocking, validate};

/// Options controlling how an exported document is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Pretty-print with two-space indentation.
    ///
    /// Authored files are pretty-printed so they stay human-diffable; compact
    /// output is meant for tooling and tests.
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ExportOptions {
    /// Creates default (pretty) export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates compact (single-line) export options.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

/// Parses JSON text into a canonical document.
pub fn import_str(text: &str) -> Result<WavesDoc, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ImportError::NotJson(e.to_string()))?;
    import_value(value)
}

/// Converts an already-parsed JSON value into a canonical document.
///
/// The root must be an object whose `version` is numerically `1` (`1.0` is
/// accepted). The version is checked before the rest of the shape so an
/// unsupported file reports its version rather than whatever field fails
/// first. Field values are not judged here; export validation reports them.
pub fn import_value(mut value: Value) -> Result<WavesDoc, ImportError> {
    let Value::Object(root) = &mut value else {
        return Err(ImportError::NotAnObject);
    };

    match root.get("version") {
        Some(v) if v.as_f64() == Some(f64::from(FORMAT_VERSION)) => {}
        other => {
            return Err(ImportError::UnsupportedVersion { found: other.map(Value::to_string) });
        }
    }
    root.insert("version".to_string(), Value::from(FORMAT_VERSION));

    let file: WavesFile = serde_json::from_value(value).map_err(|e| ImportError::Malformed(e.to_string()))?;
    let doc = normalize_in(file)?;

    info!(
        waves = doc.waves.len(),
        ships = doc.ship_count(),
        affixes = doc.affixes.len(),
        behaviors = doc.behaviors.len(),
        "imported waves document"
    );
    Ok(doc)
}

/// Produces the persisted JSON value for a document, without validating it.
pub fn export_value(doc: &WavesDoc) -> Result<Value, ExportError> {
    serde_json::to_value(normalize_out(doc)).map_err(|e| ExportError::Serialize(e.to_string()))
}

/// Renders a document for saving, refusing if validation finds errors.
///
/// On refusal the full issue list (errors and warnings) is returned so the
/// caller can point the user at every problem at once.
pub fn export_string(doc: &WavesDoc, options: ExportOptions) -> Result<String, ExportError> {
    let value = export_value(doc)?;

    let issues = validate(&value);
    if has_blocking(&issues) {
        warn!(issues = issues.len(), "export blocked by validation errors");
        return Err(ExportError::Blocked { issues });
    }

    let text = if options.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|e| ExportError::Serialize(e.to_string()))?;

    info!(waves = doc.waves.len(), bytes = text.len(), "exported waves document");
    Ok(text)
}
