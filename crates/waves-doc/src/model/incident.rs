//! Scripted incidents attached to a wave.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::num;

/// A scripted event with a spawn probability.
///
/// `options` belongs to the external script. It is carried verbatim, key
/// order included, and never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentEntry {
    /// Probability in `[0, 1]`; checked at export, not on write.
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub spawn_chance: Option<f64>,
    /// Empty until a script is chosen.
    #[serde(default)]
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
    /// Display-only name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub delay_seconds: Option<f64>,
}

impl IncidentEntry {
    pub fn new(spawn_chance: f64, script: impl Into<String>) -> Self {
        Self {
            spawn_chance: Some(spawn_chance),
            script: script.into(),
            options: None,
            label: None,
            delay_seconds: None,
        }
    }

    /// One-line description of `options` for listings.
    ///
    /// Recognizes the tiered portal shape (`maxDuration`/`tiers`) and the
    /// cargo shape (`ships`/`rewardBlockTier`); anything else lists its keys.
    pub fn options_summary(&self) -> String {
        let Some(options) = self.options.as_ref() else {
            return "(none)".to_string();
        };

        let tiers = options.get("tiers").and_then(Value::as_array);
        if options.contains_key("maxDuration") || tiers.is_some() {
            return format!(
                "maxDuration: {}, tiers: {}",
                display_or_dash(options.get("maxDuration")),
                tiers.map_or(0, Vec::len)
            );
        }

        if let Some(ships) = options.get("ships").and_then(Value::as_array) {
            return format!(
                "ships: {}, rewardTier: {}",
                ships.len(),
                display_or_dash(options.get("rewardBlockTier"))
            );
        }

        if options.is_empty() {
            "(none)".to_string()
        } else {
            options.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

fn display_or_dash(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl Default for IncidentEntry {
    /// The entry added by the editor: always spawns, script not chosen yet.
    fn default() -> Self {
        IncidentEntry::new(1.0, "")
    }
}

/// Partial update for an [`IncidentEntry`]; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentPatch {
    pub spawn_chance: Option<f64>,
    pub script: Option<String>,
    pub options: Option<Option<Map<String, Value>>>,
    pub label: Option<Option<String>>,
    pub delay_seconds: Option<Option<f64>>,
}

impl IncidentPatch {
    /// Shallow-merges the set fields into `incident`.
    pub fn apply_to(self, incident: &mut IncidentEntry) {
        if let Some(v) = self.spawn_chance {
            incident.spawn_chance = Some(v);
        }
        if let Some(v) = self.script {
            incident.script = v;
        }
        if let Some(v) = self.options {
            incident.options = v;
        }
        if let Some(v) = self.label {
            incident.label = v;
        }
        if let Some(v) = self.delay_seconds {
            incident.delay_seconds = v;
        }
    }
}

/// Parses free-form text as a JSON object for `options`/`params`.
///
/// Blank text means "no record" and yields `Ok(None)`.
pub fn parse_inline_object(text: &str) -> Result<Option<Map<String, Value>>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(trimmed).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(Some(map)),
        other => Err(format!("expected an object, found {}", json_type_name(&other))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_preserved_in_order() {
        let raw = json!({
            "spawnChance": 0.5,
            "script": "CursedCargoIncident",
            "options": { "zeta": 1, "alpha": { "nested": [1, 2, 3] }, "mid": null }
        });
        let incident: IncidentEntry = serde_json::from_value(raw.clone()).unwrap();
        let keys: Vec<_> = incident.options.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        assert_eq!(serde_json::to_value(&incident).unwrap(), raw);
    }

    #[test]
    fn test_spawn_chance_written_as_integer_when_whole() {
        let text = serde_json::to_string(&IncidentEntry::new(1.0, "QuantumBoomIncident")).unwrap();
        assert_eq!(text, r#"{"spawnChance":1,"script":"QuantumBoomIncident"}"#);
    }

    #[test]
    fn test_incident_reads_missing_fields() {
        let incident: IncidentEntry = serde_json::from_value(json!({ "label": "Unfinished" })).unwrap();
        assert_eq!(incident.spawn_chance, None);
        assert_eq!(incident.script, "");
        assert_eq!(
            serde_json::to_value(&incident).unwrap(),
            json!({ "script": "", "label": "Unfinished" })
        );
    }

    #[test]
    fn test_options_summary() {
        let mut incident = IncidentEntry::default();
        assert_eq!(incident.options_summary(), "(none)");

        incident.options = parse_inline_object(r#"{"maxDuration": 20, "tiers": [[], []]}"#).unwrap();
        assert_eq!(incident.options_summary(), "maxDuration: 20, tiers: 2");

        incident.options = parse_inline_object(r#"{"ships": [{}], "rewardBlockTier": 1}"#).unwrap();
        assert_eq!(incident.options_summary(), "ships: 1, rewardTier: 1");

        incident.options = parse_inline_object(r#"{"radius": 3, "color": "red"}"#).unwrap();
        assert_eq!(incident.options_summary(), "radius, color");
    }

    #[test]
    fn test_parse_inline_object() {
        assert_eq!(parse_inline_object("   "), Ok(None));
        assert!(parse_inline_object("{\"a\": ").is_err());
        assert_eq!(
            parse_inline_object("[1, 2]"),
            Err("expected an object, found an array".to_string())
        );
    }
}
