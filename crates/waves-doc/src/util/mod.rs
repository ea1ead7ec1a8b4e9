//! Utility modules for waves documents.

pub mod ids;
pub mod num;
pub mod reorder;

pub use ids::next_free_id;
pub use reorder::reorder;
