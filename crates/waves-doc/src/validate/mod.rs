//! Structural validation of persisted documents.
//!
//! Validation runs on the JSON form of a document (what would be written to
//! disk), so it can also inspect files that do not deserialize cleanly.
//! It never fails and never mutates: every problem becomes a
//! [`ValidationIssue`] with a path like `waves[0].ships[2].count`.
//!
//! Only [`Severity::Error`] issues block export.

use std::fmt;

use serde_json::Value;

use crate::model::{WavesFile, incident::json_type_name};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocks export.
    Error,
    /// Reported but never blocks.
    Warning,
}

/// A single problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Location of the offending value, e.g. `waves[0].incidents[1].script`.
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into(), severity: Severity::Error }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into(), severity: Severity::Warning }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{tag}: {}: {}", self.path, self.message)
    }
}

/// Returns true if any issue blocks export.
pub fn has_blocking(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_blocking)
}

/// Validates a persisted document given as JSON.
///
/// Checks, per wave:
/// - `ships` is an array (otherwise one error for the wave and its ships
///   are skipped; other waves are still checked)
/// - each ship's `shipId` is a non-empty string
/// - each ship's `count` is an integer >= 1
/// - each incident's `spawnChance` is a number in `[0, 1]`
/// - each incident's `script` is a non-empty string
pub fn validate(doc: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(waves) = doc.get("waves").and_then(Value::as_array) else {
        issues.push(ValidationIssue::error("waves", "Must be an array"));
        return issues;
    };

    for (wi, wave) in waves.iter().enumerate() {
        validate_wave(wi, wave, &mut issues);
    }

    issues
}

/// Validates a typed persisted document.
pub fn validate_file(file: &WavesFile) -> Vec<ValidationIssue> {
    match serde_json::to_value(file) {
        Ok(value) => validate(&value),
        Err(e) => vec![ValidationIssue::error("", format!("Not serializable: {e}"))],
    }
}

fn validate_wave(wi: usize, wave: &Value, issues: &mut Vec<ValidationIssue>) {
    match wave.get("ships") {
        Some(Value::Array(ships)) => {
            for (si, ship) in ships.iter().enumerate() {
                validate_ship(&format!("waves[{wi}].ships[{si}]"), ship, issues);
            }
        }
        other => issues.push(ValidationIssue::error(
            format!("waves[{wi}].ships"),
            format!("Must be an array, found {}", describe(other)),
        )),
    }

    match wave.get("incidents") {
        None | Some(Value::Null) => {}
        Some(Value::Array(incidents)) => {
            for (ii, incident) in incidents.iter().enumerate() {
                validate_incident(&format!("waves[{wi}].incidents[{ii}]"), incident, issues);
            }
        }
        Some(other) => issues.push(ValidationIssue::error(
            format!("waves[{wi}].incidents"),
            format!("Must be an array, found {}", json_type_name(other)),
        )),
    }
}

fn validate_ship(path: &str, ship: &Value, issues: &mut Vec<ValidationIssue>) {
    let ship_id_ok = ship.get("shipId").and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    if !ship_id_ok {
        issues.push(ValidationIssue::error(format!("{path}.shipId"), "Required"));
    }

    let count_ok = ship
        .get("count")
        .and_then(Value::as_f64)
        .is_some_and(|n| n.fract() == 0.0 && n >= 1.0);
    if !count_ok {
        issues.push(ValidationIssue::error(format!("{path}.count"), "Must be an integer >= 1"));
    }
}

fn validate_incident(path: &str, incident: &Value, issues: &mut Vec<ValidationIssue>) {
    let chance_ok = incident
        .get("spawnChance")
        .and_then(Value::as_f64)
        .is_some_and(|c| (0.0..=1.0).contains(&c));
    if !chance_ok {
        issues.push(ValidationIssue::error(format!("{path}.spawnChance"), "Must be a number in 0..1"));
    }

    let script_ok = incident.get("script").and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    if !script_ok {
        issues.push(ValidationIssue::error(format!("{path}.script"), "Required"));
    }
}

fn describe(value: Option<&Value>) -> &'static str {
    value.map_or("nothing", json_type_name)
}
