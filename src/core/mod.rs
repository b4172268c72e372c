//! Geometric primitives, mesh buffers, and the scene collaborator.

pub mod types;
pub mod mesh;
pub mod scene;

pub use types::{Capsule, Plane, Segment, Transform, Triangle};
pub use mesh::{Aabb, Geometry};
pub use scene::{collect_triangles, Layers, NodeKind, SceneNode};
