use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which triangle feature produced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    /// The capsule axis crosses the triangle interior.
    Face,
    /// The capsule surface reaches one of the triangle edges.
    Edge,
}

/// Separation data for one capsule/triangle pair: moving the capsule by
/// `normal * depth` removes the overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub normal: Vec3,
    pub point: Vec3,
    pub depth: f32,
    pub kind: ContactKind,
}

impl Contact {
    /// Translation that pushes the capsule out of this contact.
    pub fn push_out(&self) -> Vec3 {
        self.normal * self.depth
    }
}

/// Aggregate depenetration for a capsule against the whole mesh.
///
/// `normal` is unit length unless every contact cancelled out, in which case
/// `depth` is zero and `normal` is the first processed contact's normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub normal: Vec3,
    pub depth: f32,
    /// Number of contacts that fed into the result.
    pub contact_count: usize,
}

impl Resolution {
    pub fn translation(&self) -> Vec3 {
        self.normal * self.depth
    }
}
