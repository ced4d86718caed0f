//! Note stream converters
//!
//! Shaping passes shared by the renderers: chord grouping and
//! inter-group delta encoding.

pub mod diff;
pub mod grouping;

// Re-export for convenience
pub use diff::{diff_encode, DiffEncoder, TimedGroup, FINAL_GROUP_DELTA};
pub use grouping::{collect_groups, group_flat_notes};
