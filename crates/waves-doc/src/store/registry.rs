//! Affix and behavior registry maintenance.
//!
//! Both registries follow the same rules, so every operation is written once
//! against [`RegistryKind`] and exposed twice with concrete names. Renames and
//! deletions rescan every ship in every wave and rewrite matching references
//! in the same commit as the registry change.

use indexmap::IndexMap;

use crate::error::EditError;
use crate::model::presets::{AFFIX_PRESETS, BEHAVIOR_PRESETS};
use crate::model::{AffixSet, BehaviorSpec, Modifier, Registry, ShipEntry, WavesDoc, parse_inline_object};
use crate::store::DocumentStore;
use crate::util::next_free_id;

/// Access to one registry and to the ship field that references it.
trait RegistryKind {
    type Entry: Clone + 'static;

    const NAME: &'static str;

    fn registry(doc: &WavesDoc) -> &Registry<Self::Entry>;
    fn registry_mut(doc: &mut WavesDoc) -> &mut Registry<Self::Entry>;
    fn slot(ship: &mut ShipEntry) -> &mut Option<Modifier<Self::Entry>>;
    fn presets() -> &'static IndexMap<&'static str, Self::Entry>;
    fn exists(id: &str) -> EditError;
    fn missing(id: &str) -> EditError;
}

struct Affixes;

impl RegistryKind for Affixes {
    type Entry = AffixSet;

    const NAME: &'static str = "affix";

    fn registry(doc: &WavesDoc) -> &Registry<AffixSet> {
        &doc.affixes
    }

    fn registry_mut(doc: &mut WavesDoc) -> &mut Registry<AffixSet> {
        &mut doc.affixes
    }

    fn slot(ship: &mut ShipEntry) -> &mut Option<Modifier<AffixSet>> {
        &mut ship.affixes
    }

    fn presets() -> &'static IndexMap<&'static str, AffixSet> {
        &AFFIX_PRESETS
    }

    fn exists(id: &str) -> EditError {
        EditError::AffixExists { id: id.to_string() }
    }

    fn missing(id: &str) -> EditError {
        EditError::MissingAffix { id: id.to_string() }
    }
}

struct Behaviors;

impl RegistryKind for Behaviors {
    type Entry = BehaviorSpec;

    const NAME: &'static str = "behavior";

    fn registry(doc: &WavesDoc) -> &Registry<BehaviorSpec> {
        &doc.behaviors
    }

    fn registry_mut(doc: &mut WavesDoc) -> &mut Registry<BehaviorSpec> {
        &mut doc.behaviors
    }

    fn slot(ship: &mut ShipEntry) -> &mut Option<Modifier<BehaviorSpec>> {
        &mut ship.behavior
    }

    fn presets() -> &'static IndexMap<&'static str, BehaviorSpec> {
        &BEHAVIOR_PRESETS
    }

    fn exists(id: &str) -> EditError {
        EditError::BehaviorExists { id: id.to_string() }
    }

    fn missing(id: &str) -> EditError {
        EditError::MissingBehavior { id: id.to_string() }
    }
}

/// Rewrites every ship reference to `old`; `None` clears the reference.
///
/// Returns the number of ship entries changed.
fn rewrite_refs<K: RegistryKind>(doc: &mut WavesDoc, old: &str, new: Option<&str>) -> usize {
    let mut changed = 0;
    for ship in doc.waves.iter_mut().flat_map(|w| w.ships.iter_mut()) {
        let slot = K::slot(ship);
        if slot.as_ref().and_then(Modifier::ref_id) == Some(old) {
            *slot = new.map(Modifier::reference);
            changed += 1;
        }
    }
    changed
}

impl DocumentStore {
    fn upsert_entry<K: RegistryKind>(&mut self, op: &'static str, id: &str, entry: K::Entry) -> Result<(), EditError> {
        if id.is_empty() {
            return Err(EditError::EmptyId { registry: K::NAME });
        }
        self.commit(op, |doc| {
            K::registry_mut(doc).insert(id.to_string(), entry);
            Ok(())
        })
    }

    fn remove_entry<K: RegistryKind>(&mut self, op: &'static str, id: &str) -> Option<K::Entry> {
        if !K::registry(self.doc()).contains_key(id) {
            return None;
        }
        self.commit(op, |doc| Ok(K::registry_mut(doc).shift_remove(id))).ok().flatten()
    }

    fn rename_entry<K: RegistryKind>(&mut self, op: &'static str, old: &str, new: &str) -> Result<bool, EditError> {
        let registry = K::registry(self.doc());
        if old == new || !registry.contains_key(old) {
            return Ok(false);
        }
        if new.is_empty() {
            return Err(EditError::EmptyId { registry: K::NAME });
        }
        if registry.contains_key(new) {
            return Err(K::exists(new));
        }

        self.commit(op, |doc| {
            let registry = K::registry_mut(doc);
            *registry = std::mem::take(registry)
                .into_iter()
                .map(|(id, entry)| if id == old { (new.to_string(), entry) } else { (id, entry) })
                .collect();
            rewrite_refs::<K>(doc, old, Some(new));
            Ok(true)
        })
    }

    fn delete_entry_with_replace<K: RegistryKind>(
        &mut self,
        op: &'static str,
        old: &str,
        replacement: &str,
    ) -> Result<usize, EditError> {
        let replacement = (!replacement.is_empty()).then_some(replacement);
        if let Some(r) = replacement {
            if r == old || !K::registry(self.doc()).contains_key(r) {
                return Err(K::missing(r));
            }
        }

        self.commit(op, |doc| {
            let changed = rewrite_refs::<K>(doc, old, replacement);
            K::registry_mut(doc).shift_remove(old);
            Ok(changed)
        })
    }

    fn add_preset<K: RegistryKind>(&mut self, op: &'static str, name: &str) -> Result<String, EditError> {
        let entry = K::presets()
            .get(name)
            .cloned()
            .ok_or_else(|| EditError::UnknownPreset { name: name.to_string() })?;
        let registry = K::registry(self.doc());
        let id = next_free_id(name, |candidate| registry.contains_key(candidate));

        self.commit(op, |doc| {
            K::registry_mut(doc).insert(id.clone(), entry);
            Ok(id)
        })
    }

    // =========================================================================
    // Affixes
    // =========================================================================

    /// Inserts or replaces an affix set verbatim. A replaced entry keeps its
    /// registry position. Fails with [`EditError::EmptyId`] for an empty id.
    pub fn upsert_affix(&mut self, id: &str, affixes: AffixSet) -> Result<(), EditError> {
        self.upsert_entry::<Affixes>("upsert_affix", id, affixes)
    }

    /// Removes an affix without touching references to it.
    pub fn remove_affix(&mut self, id: &str) -> Option<AffixSet> {
        self.remove_entry::<Affixes>("remove_affix", id)
    }

    /// Renames an affix and every ship reference to it.
    ///
    /// Returns `Ok(false)` without changing anything if `old` does not exist
    /// or equals `new`. Fails with [`EditError::EmptyId`] if `new` is empty and
    /// with [`EditError::AffixExists`] if it is taken.
    pub fn rename_affix(&mut self, old: &str, new: &str) -> Result<bool, EditError> {
        self.rename_entry::<Affixes>("rename_affix", old, new)
    }

    /// Deletes an affix, pointing its references at `replacement`.
    ///
    /// An empty `replacement` clears the references instead. A non-empty one
    /// must name another existing affix. Returns the number of ship entries
    /// rewritten.
    pub fn delete_affix_with_replace(&mut self, old: &str, replacement: &str) -> Result<usize, EditError> {
        self.delete_entry_with_replace::<Affixes>("delete_affix_with_replace", old, replacement)
    }

    /// Copies a catalogue affix set into the registry under a fresh id.
    pub fn add_affix_preset(&mut self, name: &str) -> Result<String, EditError> {
        self.add_preset::<Affixes>("add_affix_preset", name)
    }

    // =========================================================================
    // Behaviors
    // =========================================================================

    /// Inserts or replaces a behavior verbatim. A replaced entry keeps its
    /// registry position.
    pub fn upsert_behavior(&mut self, id: &str, behavior: BehaviorSpec) -> Result<(), EditError> {
        self.upsert_entry::<Behaviors>("upsert_behavior", id, behavior)
    }

    /// Removes a behavior without touching references to it.
    pub fn remove_behavior(&mut self, id: &str) -> Option<BehaviorSpec> {
        self.remove_entry::<Behaviors>("remove_behavior", id)
    }

    /// Renames a behavior and every ship reference to it.
    ///
    /// Same rules as [`rename_affix`](Self::rename_affix).
    pub fn rename_behavior(&mut self, old: &str, new: &str) -> Result<bool, EditError> {
        self.rename_entry::<Behaviors>("rename_behavior", old, new)
    }

    /// Deletes a behavior, pointing its references at `replacement`.
    ///
    /// Same rules as [`delete_affix_with_replace`](Self::delete_affix_with_replace).
    pub fn delete_behavior_with_replace(&mut self, old: &str, replacement: &str) -> Result<usize, EditError> {
        self.delete_entry_with_replace::<Behaviors>("delete_behavior_with_replace", old, replacement)
    }

    pub fn add_behavior_preset(&mut self, name: &str) -> Result<String, EditError> {
        self.add_preset::<Behaviors>("add_behavior_preset", name)
    }

    /// Replaces a behavior's `params` with free-form JSON object text.
    ///
    /// Blank text clears the params. On a parse failure the stored params are
    /// kept.
    pub fn set_behavior_params_text(&mut self, id: &str, text: &str) -> Result<(), EditError> {
        let params = parse_inline_object(text).map_err(|reason| EditError::InlineJson { field: "params", reason })?;
        self.commit("set_behavior_params_text", |doc| {
            let behavior = doc.behaviors.get_mut(id).ok_or_else(|| Behaviors::missing(id))?;
            behavior.params = params;
            Ok(())
        })
    }

    /// Merges the engagement, disengage and siege ranges into a behavior's
    /// params. `None` leaves that range as it is.
    pub fn set_behavior_ranges(
        &mut self,
        id: &str,
        engagement: Option<f64>,
        disengage: Option<f64>,
        siege: Option<f64>,
    ) -> Result<(), EditError> {
        self.commit("set_behavior_ranges", |doc| {
            let behavior = doc.behaviors.get_mut(id).ok_or_else(|| Behaviors::missing(id))?;
            behavior.set_ranges(engagement, disengage, siege);
            Ok(())
        })
    }
}
