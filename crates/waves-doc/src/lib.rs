//! Waves: document model and consistency engine for wave configuration files.
//!
//! This crate owns the editable representation of a waves file: timed spawn
//! lists, scripted incidents, and the two shared registries (affixes and
//! behaviors) that ship entries reference by id.
//!
//! # Overview
//!
//! - **Canonical vs persisted**: files on disk are sparse; the in-memory
//!   document is fully defaulted. The [`codec`] module converts between them.
//! - **Referential integrity**: renaming or deleting a registry entry rewrites
//!   every ship reference in one atomic step (see [`store`]).
//! - **Export gate**: a document only leaves the editor after [`validate`]
//!   reports no error-severity issues.
//!
//! # Quick Start
//!
//! ```rust
//! use waves_doc::{DocumentStore, ExportOptions, import_str};
//!
//! let doc = import_str(r#"{
//!     "version": 1,
//!     "affixes": { "FAST": { "thrustPowerMulti": 1.8 } },
//!     "waves": [ { "ships": [ { "shipId": "scout", "count": 3, "affixesRef": "FAST" } ] } ]
//! }"#).unwrap();
//!
//! let mut store = DocumentStore::from_doc(doc);
//! store.rename_affix("FAST", "QUICK").unwrap();
//! assert_eq!(store.doc().waves[0].ships[0].affix_ref(), Some("QUICK"));
//!
//! let text = store.export(ExportOptions::compact()).unwrap();
//! assert!(text.contains("\"affixesRef\":\"QUICK\""));
//! assert!(!store.is_dirty());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Document types (canonical and persisted), patches, builders, presets
//! - [`codec`]: Normalization and the JSON import/export boundary
//! - [`store`]: The mutable document store and all editing operations
//! - [`select`]: Read-only usage aggregation over a document
//! - [`validate`]: Export-time structural validation
//! - [`util`]: Reordering and id helpers
//! - [`error`]: Error types

pub mod codec;
pub mod error;
pub mod model;
pub mod select;
pub mod store;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{ExportOptions, export_string, export_value, import_str, import_value, normalize_in, normalize_out};
pub use error::{EditError, ErrorKind, ExportError, ImportError};
pub use model::{
    AffixSet, AtCoords, BehaviorSpec, DocBuilder, FORMAT_VERSION, IncidentEntry, IncidentPatch,
    Modifier, Registry, ShipEntry, ShipPatch, SpawnDistribution, Wave, WaveDuration, WaveFile,
    WavePatch, WavesDoc, WavesFile,
};
pub use store::DocumentStore;
pub use validate::{Severity, ValidationIssue, has_blocking, validate, validate_file};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
