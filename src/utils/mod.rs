//! Utility helpers: segment math and scoped logging.

pub mod logging;
pub mod math;

pub use math::{segment_closest_points, ClosestPoints};
