//! Collision modules: triangle BVH, capsule narrow-phase, contact resolution.

pub mod bvh;
pub mod narrowphase;
pub mod contact;
pub mod queries;

pub use bvh::{Bvh, BvhLeaf, BvhNode, BvhStats};
pub use contact::{Contact, ContactKind, Resolution};
pub use narrowphase::TriangleCapsuleTest;
pub use queries::ContactResolver;
