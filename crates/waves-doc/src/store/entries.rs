//! Ship and incident operations within a wave.
//!
//! Ships and incidents are both ordered lists owned by a wave. The wave index
//! is checked first, so an operation on a missing wave reports `waves` as the
//! offending collection even if the entry index is also bad.

use crate::error::EditError;
use crate::model::presets::INCIDENT_PRESETS;
use crate::model::{IncidentEntry, IncidentPatch, ShipEntry, ShipPatch, Wave, WavesDoc, parse_inline_object};
use crate::store::{DocumentStore, check_index, wave_mut};
use crate::util::reorder;

fn ship_mut(doc: &mut WavesDoc, wi: usize, si: usize) -> Result<&mut ShipEntry, EditError> {
    let ships = &mut wave_mut(doc, wi)?.ships;
    let len = ships.len();
    ships
        .get_mut(si)
        .ok_or(EditError::IndexOutOfBounds { collection: "ships", index: si, len })
}

/// The incident list of a wave; a list that was never created has length 0.
fn incidents_mut(wave: &mut Wave) -> Result<&mut Vec<IncidentEntry>, EditError> {
    wave.incidents
        .as_mut()
        .ok_or(EditError::IndexOutOfBounds { collection: "incidents", index: 0, len: 0 })
}

fn incident_mut(doc: &mut WavesDoc, wi: usize, ii: usize) -> Result<&mut IncidentEntry, EditError> {
    let wave = wave_mut(doc, wi)?;
    let len = wave.incidents().len();
    wave.incidents
        .as_mut()
        .and_then(|list| list.get_mut(ii))
        .ok_or(EditError::IndexOutOfBounds { collection: "incidents", index: ii, len })
}

/// Moves an element within `items`, reporting out-of-range indices.
fn reorder_in_place<T: Clone>(
    collection: &'static str,
    items: &mut Vec<T>,
    from: usize,
    to: usize,
) -> Result<(), EditError> {
    let len = items.len();
    check_index(collection, from, len)?;
    check_index(collection, to, len)?;
    if let Some(moved) = reorder(items.as_slice(), from, to) {
        *items = moved;
    }
    Ok(())
}

impl DocumentStore {
    // =========================================================================
    // Ships
    // =========================================================================

    /// Appends a default ship entry (no ship chosen, one copy, hunting) and
    /// returns its index.
    pub fn add_ship(&mut self, wi: usize) -> Result<usize, EditError> {
        self.commit("add_ship", |doc| {
            let ships = &mut wave_mut(doc, wi)?.ships;
            ships.push(ShipEntry::default());
            Ok(ships.len() - 1)
        })
    }

    pub fn delete_ship(&mut self, wi: usize, si: usize) -> Result<ShipEntry, EditError> {
        self.commit("delete_ship", |doc| {
            let ships = &mut wave_mut(doc, wi)?.ships;
            check_index("ships", si, ships.len())?;
            Ok(ships.remove(si))
        })
    }

    /// Inserts a deep copy of a ship entry right after it and returns the
    /// copy's index.
    pub fn duplicate_ship(&mut self, wi: usize, si: usize) -> Result<usize, EditError> {
        self.commit("duplicate_ship", |doc| {
            let ships = &mut wave_mut(doc, wi)?.ships;
            let copy = ships
                .get(si)
                .cloned()
                .ok_or(EditError::IndexOutOfBounds { collection: "ships", index: si, len: ships.len() })?;
            ships.insert(si + 1, copy);
            Ok(si + 1)
        })
    }

    pub fn reorder_ships(&mut self, wi: usize, from: usize, to: usize) -> Result<(), EditError> {
        self.commit("reorder_ships", |doc| {
            reorder_in_place("ships", &mut wave_mut(doc, wi)?.ships, from, to)
        })
    }

    /// Shallow-merges `patch` into a ship entry. No validation happens here.
    pub fn update_ship(&mut self, wi: usize, si: usize, patch: ShipPatch) -> Result<(), EditError> {
        self.commit("update_ship", |doc| {
            patch.apply_to(ship_mut(doc, wi, si)?);
            Ok(())
        })
    }

    pub fn set_ship_id(&mut self, wi: usize, si: usize, ship_id: impl Into<String>) -> Result<(), EditError> {
        self.update_ship(wi, si, ShipPatch { ship_id: Some(ship_id.into()), ..Default::default() })
    }

    // =========================================================================
    // Incidents
    // =========================================================================

    /// Appends a default incident (always spawns, no script yet), creating the
    /// wave's incident list if needed. Returns the new index.
    pub fn add_incident(&mut self, wi: usize) -> Result<usize, EditError> {
        self.push_incident("add_incident", wi, IncidentEntry::default())
    }

    /// Appends a copy of a catalogue incident. Returns the new index.
    pub fn add_incident_preset(&mut self, wi: usize, name: &str) -> Result<usize, EditError> {
        let incident = INCIDENT_PRESETS
            .get(name)
            .cloned()
            .ok_or_else(|| EditError::UnknownPreset { name: name.to_string() })?;
        self.push_incident("add_incident_preset", wi, incident)
    }

    fn push_incident(&mut self, op: &'static str, wi: usize, incident: IncidentEntry) -> Result<usize, EditError> {
        self.commit(op, |doc| {
            let list = wave_mut(doc, wi)?.incidents.get_or_insert_with(Vec::new);
            list.push(incident);
            Ok(list.len() - 1)
        })
    }

    /// Removes an incident. The list itself stays, even when it becomes empty.
    pub fn delete_incident(&mut self, wi: usize, ii: usize) -> Result<IncidentEntry, EditError> {
        self.commit("delete_incident", |doc| {
            let list = incidents_mut(wave_mut(doc, wi)?)?;
            check_index("incidents", ii, list.len())?;
            Ok(list.remove(ii))
        })
    }

    /// Inserts a deep copy of an incident right after it and returns the
    /// copy's index.
    pub fn duplicate_incident(&mut self, wi: usize, ii: usize) -> Result<usize, EditError> {
        self.commit("duplicate_incident", |doc| {
            let copy = incident_mut(doc, wi, ii)?.clone();
            incidents_mut(wave_mut(doc, wi)?)?.insert(ii + 1, copy);
            Ok(ii + 1)
        })
    }

    pub fn reorder_incidents(&mut self, wi: usize, from: usize, to: usize) -> Result<(), EditError> {
        self.commit("reorder_incidents", |doc| {
            let list = incidents_mut(wave_mut(doc, wi)?)?;
            reorder_in_place("incidents", list, from, to)
        })
    }

    /// Shallow-merges `patch` into an incident. No validation happens here.
    pub fn update_incident(&mut self, wi: usize, ii: usize, patch: IncidentPatch) -> Result<(), EditError> {
        self.commit("update_incident", |doc| {
            patch.apply_to(incident_mut(doc, wi, ii)?);
            Ok(())
        })
    }

    /// Replaces an incident's `options` with free-form JSON object text.
    ///
    /// Blank text clears the options. Text that is not a JSON object is
    /// rejected and the stored options are kept.
    pub fn set_incident_options_text(&mut self, wi: usize, ii: usize, text: &str) -> Result<(), EditError> {
        let options = parse_inline_object(text).map_err(|reason| EditError::InlineJson { field: "options", reason })?;
        self.update_incident(wi, ii, IncidentPatch { options: Some(options), ..Default::default() })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::EditError;
    use crate::model::{AffixSet, DocBuilder, IncidentPatch, Modifier, ShipPatch};
    use crate::store::DocumentStore;
    use serde_json::json;

    fn store() -> DocumentStore {
        DocumentStore::from_doc(
            DocBuilder::new()
                .wave(|w| {
                    w.ship("a", 1, |s| s)
                        .ship("b", 2, |s| s.affix_ref("FAST"))
                        .ship("c", 3, |s| s)
                })
                .empty_wave()
                .build(),
        )
    }

    fn ship_ids(store: &DocumentStore, wi: usize) -> Vec<&str> {
        store.doc().waves[wi].ships.iter().map(|s| s.ship_id.as_str()).collect()
    }

    #[test]
    fn test_add_ship_uses_editor_defaults() {
        let mut store = store();
        let si = store.add_ship(1).unwrap();
        assert_eq!(si, 0);

        let ship = &store.doc().waves[1].ships[0];
        assert_eq!(ship.ship_id, "");
        assert_eq!(ship.count, Some(1.0));
        assert_eq!(ship.hunter, Some(true));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_ship_ops_check_wave_index_first() {
        let mut store = store();
        assert_eq!(
            store.delete_ship(9, 9),
            Err(EditError::IndexOutOfBounds { collection: "waves", index: 9, len: 2 })
        );
        assert_eq!(
            store.delete_ship(0, 3),
            Err(EditError::IndexOutOfBounds { collection: "ships", index: 3, len: 3 })
        );
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_duplicate_ship_inserts_deep_copy_after() {
        let mut store = store();
        assert_eq!(store.duplicate_ship(0, 1), Ok(2));
        assert_eq!(ship_ids(&store, 0), vec!["a", "b", "b", "c"]);

        store.set_ship_id(0, 2, "b2").unwrap();
        assert_eq!(store.doc().waves[0].ships[1].ship_id, "b");
        assert_eq!(store.doc().waves[0].ships[2].affix_ref(), Some("FAST"));
    }

    #[test]
    fn test_delete_and_reorder_ships() {
        let mut store = store();
        store.reorder_ships(0, 0, 2).unwrap();
        assert_eq!(ship_ids(&store, 0), vec!["b", "c", "a"]);

        let removed = store.delete_ship(0, 0).unwrap();
        assert_eq!(removed.ship_id, "b");
        assert_eq!(ship_ids(&store, 0), vec!["c", "a"]);

        let before = store.snapshot();
        assert!(store.reorder_ships(0, 0, 5).is_err());
        assert_eq!(*store.doc(), *before);
    }

    #[test]
    fn test_update_ship_merges_patch() {
        let mut store = store();
        store
            .update_ship(0, 1, ShipPatch {
                count: Some(7.0),
                no_clip: Some(Some(true)),
                affixes: Some(Some(Modifier::Inline(AffixSet { fire_rate_multi: Some(2.0), ..Default::default() }))),
                ..Default::default()
            })
            .unwrap();

        let ship = &store.doc().waves[0].ships[1];
        assert_eq!(ship.ship_id, "b");
        assert_eq!(ship.count, Some(7.0));
        assert_eq!(ship.no_clip, Some(true));
        assert_eq!(ship.affix_ref(), None);
    }

    #[test]
    fn test_update_ship_does_not_validate() {
        let mut store = store();
        store.update_ship(0, 0, ShipPatch { count: Some(0.0), ..Default::default() }).unwrap();
        assert_eq!(store.doc().waves[0].ships[0].count, Some(0.0));
    }

    #[test]
    fn test_add_incident_creates_list_lazily() {
        let mut store = store();
        assert!(store.doc().waves[1].incidents.is_none());

        assert_eq!(store.add_incident(1), Ok(0));
        assert_eq!(store.add_incident(1), Ok(1));

        let incidents = store.doc().waves[1].incidents();
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].spawn_chance, Some(1.0));
        assert_eq!(incidents[0].script, "");
    }

    #[test]
    fn test_incident_ops_on_absent_list() {
        let mut store = store();
        assert_eq!(
            store.delete_incident(0, 0),
            Err(EditError::IndexOutOfBounds { collection: "incidents", index: 0, len: 0 })
        );
        assert!(store.duplicate_incident(0, 0).is_err());
        assert!(store.reorder_incidents(0, 0, 0).is_err());
        assert!(store.doc().waves[0].incidents.is_none());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_incident_crud() {
        let mut store = store();
        store.add_incident_preset(0, "QUANTUM_BOOM").unwrap();
        store.add_incident_preset(0, "CURSED_CARGO_T1").unwrap();
        store.duplicate_incident(0, 0).unwrap();

        let scripts = |s: &DocumentStore| -> Vec<String> {
            s.doc().waves[0].incidents().iter().map(|i| i.script.clone()).collect()
        };
        assert_eq!(scripts(&store), vec!["QuantumBoomIncident", "QuantumBoomIncident", "CursedCargoIncident"]);

        store.reorder_incidents(0, 2, 0).unwrap();
        assert_eq!(scripts(&store)[0], "CursedCargoIncident");

        store
            .update_incident(0, 1, IncidentPatch { spawn_chance: Some(0.25), label: Some(None), ..Default::default() })
            .unwrap();
        let incident = &store.doc().waves[0].incidents()[1];
        assert_eq!(incident.spawn_chance, Some(0.25));
        assert_eq!(incident.label, None);

        store.delete_incident(0, 0).unwrap();
        store.delete_incident(0, 0).unwrap();
        store.delete_incident(0, 0).unwrap();
        assert!(store.doc().waves[0].incidents.as_ref().is_some_and(Vec::is_empty));
    }

    #[test]
    fn test_add_incident_preset_unknown() {
        let mut store = store();
        assert_eq!(
            store.add_incident_preset(0, "NOPE"),
            Err(EditError::UnknownPreset { name: "NOPE".to_string() })
        );
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_incident_options_text() {
        let mut store = store();
        store.add_incident(0).unwrap();

        store.set_incident_options_text(0, 0, r#"{ "maxDuration": 20, "tiers": [] }"#).unwrap();
        let options = store.doc().waves[0].incidents()[0].options.clone();
        assert_eq!(options, json!({ "maxDuration": 20, "tiers": [] }).as_object().cloned());

        let err = store.set_incident_options_text(0, 0, "{ broken").unwrap_err();
        assert!(matches!(err, EditError::InlineJson { field: "options", .. }));
        assert_eq!(store.doc().waves[0].incidents()[0].options, options);

        assert!(store.set_incident_options_text(0, 0, "42").is_err());
        assert_eq!(store.doc().waves[0].incidents()[0].options, options);

        store.set_incident_options_text(0, 0, "  ").unwrap();
        assert_eq!(store.doc().waves[0].incidents()[0].options, None);
    }
}
