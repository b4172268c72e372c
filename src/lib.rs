//! Capsule BVH – triangle mesh collision for character controllers.
//!
//! Build a [`Bvh`] once over a static triangle soup, then resolve capsules
//! against it to get a single depenetration vector per query.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{Mat4, Quat, Vec3};

pub use collision::{
    bvh::{Bvh, BvhLeaf, BvhNode, BvhStats},
    contact::{Contact, ContactKind, Resolution},
    narrowphase::TriangleCapsuleTest,
    queries::ContactResolver,
};
pub use config::{BvhConfig, ContactOrder, ResolveOptions, SegmentClamp};
pub use crate::core::{
    mesh::{Aabb, Geometry},
    scene::{collect_triangles, Layers, NodeKind, SceneNode},
    types::{Capsule, Plane, Segment, Transform, Triangle},
};
pub use error::BvhError;
pub use world::CollisionWorld;
