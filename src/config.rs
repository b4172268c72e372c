//! Build-time configuration and numeric constants for the capsule BVH.

use serde::{Deserialize, Serialize};

use crate::error::{BvhError, Result};

/// Triangles a node may hold before it gets split.
pub const DEFAULT_MAX_LEAF_TRIANGLES: usize = 10;

/// Depth at which recursion stops regardless of leaf size.
pub const DEFAULT_MAX_DEPTH: u32 = 20;

/// Threshold below which segment denominators are treated as degenerate.
pub const PARALLEL_EPSILON: f32 = 1e-10;

/// Segments whose squared sine of the angle between them falls below this
/// are treated as parallel. Scaled by `|r|² |s|²` before comparing against
/// `|r|² |s|² - (r · s)²`, which carries f32 rounding noise near 1e-7.
pub const PARALLEL_RELATIVE_EPSILON: f32 = 1e-6;

/// Tunables used when building a [`crate::Bvh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    pub max_leaf_triangles: usize,
    pub max_depth: u32,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_leaf_triangles: DEFAULT_MAX_LEAF_TRIANGLES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BvhConfig {
    pub fn new(max_leaf_triangles: usize, max_depth: u32) -> Self {
        Self {
            max_leaf_triangles,
            max_depth,
        }
    }

    /// Both knobs must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.max_leaf_triangles == 0 {
            return Err(BvhError::InvalidConfig(
                "max_leaf_triangles must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(BvhError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Order in which collected contacts push the working capsule out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOrder {
    /// Depth-first tree order, left child before right.
    #[default]
    Traversal,
    /// Deepest contact first; ties keep traversal order.
    DeepestFirst,
}

/// How the segment closest-point routine clamps its parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentClamp {
    /// Clamp both parameters once.
    #[default]
    SinglePass,
    /// Re-solve each parameter after the other has been clamped.
    Refined,
}

/// Per-query options for capsule resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub order: ContactOrder,
    pub segment_clamp: SegmentClamp,
}
