//! The mutable document store.
//!
//! [`DocumentStore`] owns the single live document plus the editor's wave
//! selection and dirty flag. It is an ordinary value: the application owns it
//! and passes it by `&mut` to whatever edits it.
//!
//! Every mutation works on a private copy of the document and swaps the copy
//! in only when the whole operation succeeds. A rejected operation therefore
//! leaves no trace, and a [`snapshot`](DocumentStore::snapshot) taken earlier
//! keeps describing the document as it was.
//!
//! Operations are split by what they touch:
//! - this module: document lifecycle, selection, waves
//! - `entries`: ships and incidents within a wave
//! - `registry`: affix/behavior registries and their reference cascades

mod entries;
mod registry;

use std::sync::Arc;

use tracing::debug;

use crate::codec::{ExportOptions, export_string};
use crate::error::{EditError, ExportError};
use crate::model::{AtCoords, SpawnDistribution, Wave, WaveDuration, WavePatch, WavesDoc};
use crate::util::reorder::{follow_index, reorder};

/// The editor's document, selection and dirty state.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    doc: Arc<WavesDoc>,
    selected_wave: Option<usize>,
    dirty: bool,
}

impl DocumentStore {
    /// Creates a store holding an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store for a freshly loaded document.
    pub fn from_doc(doc: WavesDoc) -> Self {
        let mut store = Self::new();
        store.set_doc(doc);
        store
    }

    /// The current document.
    pub fn doc(&self) -> &WavesDoc {
        &self.doc
    }

    /// A handle to the current document that later edits will not change.
    pub fn snapshot(&self) -> Arc<WavesDoc> {
        Arc::clone(&self.doc)
    }

    pub fn selected_wave(&self) -> Option<usize> {
        self.selected_wave
    }

    /// The selected wave, if any.
    pub fn selected(&self) -> Option<&Wave> {
        self.doc.waves.get(self.selected_wave?)
    }

    /// True if the document changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Records that the current document was written out elsewhere.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Replaces the document after a load or import.
    ///
    /// Selects the first wave (if any) and clears the dirty flag.
    pub fn set_doc(&mut self, doc: WavesDoc) {
        self.selected_wave = if doc.waves.is_empty() { None } else { Some(0) };
        self.doc = Arc::new(doc);
        self.dirty = false;
        debug!(waves = self.doc.waves.len(), "document loaded into store");
    }

    /// Changes the selected wave; `None` clears the selection.
    pub fn select_wave(&mut self, index: Option<usize>) -> Result<(), EditError> {
        if let Some(i) = index {
            check_index("waves", i, self.doc.waves.len())?;
        }
        self.selected_wave = index;
        Ok(())
    }

    /// Renders the document for saving and, on success, clears the dirty flag.
    ///
    /// The document itself is never changed by export; blocking validation
    /// issues must be fixed through the normal editing operations.
    pub fn export(&mut self, options: ExportOptions) -> Result<String, ExportError> {
        let text = export_string(&self.doc, options)?;
        self.dirty = false;
        Ok(text)
    }

    /// Applies `edit` to a copy of the document and commits it if it succeeds.
    ///
    /// On success the copy replaces the document and the store becomes dirty.
    /// On error nothing changes.
    pub(crate) fn commit<R>(
        &mut self,
        op: &'static str,
        edit: impl FnOnce(&mut WavesDoc) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        let mut next = WavesDoc::clone(&self.doc);
        let out = edit(&mut next)?;
        self.doc = Arc::new(next);
        self.dirty = true;
        debug!(op, "committed edit");
        Ok(out)
    }

    // =========================================================================
    // Waves
    // =========================================================================

    /// Appends a default wave, selects it, and returns its index.
    pub fn add_wave(&mut self) -> usize {
        let mut next = WavesDoc::clone(&self.doc);
        next.waves.push(Wave::default());
        let index = next.waves.len() - 1;
        self.doc = Arc::new(next);
        self.dirty = true;
        self.selected_wave = Some(index);
        debug!(op = "add_wave", index, "committed edit");
        index
    }

    /// Removes the wave at `index`.
    ///
    /// Out-of-range indices are a no-op and return `false`. The selection is
    /// clamped to the nearest remaining wave, or cleared if none remain.
    pub fn delete_wave(&mut self, index: usize) -> bool {
        let removed = self.commit("delete_wave", |doc| {
            check_index("waves", index, doc.waves.len())?;
            doc.waves.remove(index);
            Ok(())
        });
        if removed.is_err() {
            return false;
        }

        let len = self.doc.waves.len();
        self.selected_wave = if len == 0 { None } else { Some(index.min(len - 1)) };
        true
    }

    /// Moves a wave, keeping the same logical wave selected.
    ///
    /// Returns `false` without changing anything if `from == to` or either
    /// index is out of range.
    pub fn reorder_waves(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        let Some(waves) = reorder(&self.doc.waves, from, to) else {
            return false;
        };

        let mut next = WavesDoc::clone(&self.doc);
        next.waves = waves;
        self.doc = Arc::new(next);
        self.dirty = true;
        self.selected_wave = self.selected_wave.map(|sel| follow_index(sel, from, to));
        debug!(op = "reorder_waves", from, to, "committed edit");
        true
    }

    /// Shallow-merges `patch` into the wave at `index`. No validation happens here.
    pub fn update_wave(&mut self, index: usize, patch: WavePatch) -> Result<(), EditError> {
        self.commit("update_wave", |doc| {
            patch.apply_to(wave_mut(doc, index)?);
            Ok(())
        })
    }

    pub fn set_wave_sustain(&mut self, index: usize, sustain: bool) -> Result<(), EditError> {
        self.update_wave(index, WavePatch { sustain_mode: Some(sustain), ..Default::default() })
    }

    pub fn set_wave_duration(&mut self, index: usize, duration: Option<WaveDuration>) -> Result<(), EditError> {
        self.update_wave(index, WavePatch { duration: Some(duration), ..Default::default() })
    }

    /// Changes the spawn distribution. Existing `at_coords` are kept.
    pub fn set_wave_spawn_distribution(&mut self, index: usize, distribution: SpawnDistribution) -> Result<(), EditError> {
        self.update_wave(index, WavePatch { spawn_distribution: Some(distribution), ..Default::default() })
    }

    pub fn set_wave_at_coords(&mut self, index: usize, coords: Option<AtCoords>) -> Result<(), EditError> {
        self.update_wave(index, WavePatch { at_coords: Some(coords), ..Default::default() })
    }

    pub fn set_wave_spawn_delay(&mut self, index: usize, seconds: Option<f64>) -> Result<(), EditError> {
        self.update_wave(index, WavePatch { spawn_delay: Some(seconds), ..Default::default() })
    }

    pub fn set_wave_is_boss(&mut self, index: usize, is_boss: Option<bool>) -> Result<(), EditError> {
        self.update_wave(index, WavePatch { is_boss: Some(is_boss), ..Default::default() })
    }
}

pub(crate) fn check_index(collection: &'static str, index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::IndexOutOfBounds { collection, index, len })
    }
}

pub(crate) fn wave_mut(doc: &mut WavesDoc, index: usize) -> Result<&mut Wave, EditError> {
    let len = doc.waves.len();
    doc.waves
        .get_mut(index)
        .ok_or(EditError::IndexOutOfBounds { collection: "waves", index, len })
}
