//! Conversion between JSON files and canonical documents.
//!
//! - [`normalize`]: persisted shape <-> canonical shape
//! - [`json`]: text/value boundary with version checks and the export gate

pub mod json;
pub mod normalize;

pub use json::{ExportOptions, export_string, export_value, import_str, import_value};
pub use normalize::{normalize_in, normalize_out};
