//! Data model types for waves documents.
//!
//! This module contains the document shapes:
//! - Roots (canonical [`WavesDoc`] and persisted [`WavesFile`])
//! - Waves, ship entries, incidents
//! - Registry entries (affix sets, behaviors)
//! - Patches (partial updates applied by the store)
//! - Builders and preset catalogues

pub mod builder;
pub mod document;
pub mod incident;
pub mod presets;
pub mod ship;
pub mod wave;

pub use builder::{DocBuilder, IncidentBuilder, ShipBuilder, WaveBuilder};
pub use document::{FORMAT_VERSION, Registry, WavesDoc, WavesFile};
pub use incident::{IncidentEntry, IncidentPatch, parse_inline_object};
pub use ship::{AffixId, AffixSet, BehaviorId, BehaviorSpec, Modifier, ShipEntry, ShipPatch};
pub use wave::{AtCoords, SpawnDistribution, UNBOUNDED_DURATION, Wave, WaveDuration, WaveFile, WavePatch};
