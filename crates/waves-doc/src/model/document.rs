//! Document roots: the canonical in-memory form and the persisted form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{AffixSet, BehaviorSpec, Wave, WaveFile};

/// The only file format version this crate reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// A named registry of reusable modifiers, in authored order.
pub type Registry<T> = IndexMap<String, T>;

/// The canonical document every editing operation works on.
///
/// Registries are always present (possibly empty) and every wave is fully
/// defaulted. Build one with [`crate::normalize_in`] or [`crate::DocBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct WavesDoc {
    pub version: u32,
    pub affixes: Registry<AffixSet>,
    pub behaviors: Registry<BehaviorSpec>,
    pub waves: Vec<Wave>,
}

impl Default for WavesDoc {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            affixes: Registry::new(),
            behaviors: Registry::new(),
            waves: Vec::new(),
        }
    }
}

impl WavesDoc {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of ship entries across all waves.
    pub fn ship_count(&self) -> usize {
        self.waves.iter().map(|w| w.ships.len()).sum()
    }
}

/// The document as read from and written to disk.
///
/// Empty registries are omitted on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WavesFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affixes: Option<Registry<AffixSet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behaviors: Option<Registry<BehaviorSpec>>,
    #[serde(default)]
    pub waves: Vec<WaveFile>,
}

impl Default for WavesFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            affixes: None,
            behaviors: None,
            waves: Vec::new(),
        }
    }
}
