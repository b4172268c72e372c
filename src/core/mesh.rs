use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::types::Triangle;
use crate::error::{BvhError, Result};

/// Axis-aligned bounding box used for mesh bounds and BVH nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any `extend` call will overwrite.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn from_points(points: &[Vec3]) -> Self {
        let mut bounds = Self::empty();
        for &p in points {
            bounds.extend(p);
        }
        bounds
    }

    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut bounds = Self::empty();
        for tri in triangles {
            bounds.extend(tri.a);
            bounds.extend(tri.b);
            bounds.extend(tri.c);
        }
        bounds
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full edge lengths; zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Axis with the largest extent: x, then y if strictly longer, then z if
    /// strictly longer than both.
    pub fn longest_axis(&self) -> usize {
        let size = self.size();
        let mut axis = 0;
        if size.y > size.x {
            axis = 1;
        }
        if size.z > size.y && size.z > size.x {
            axis = 2;
        }
        axis
    }
}

/// Raw renderable geometry: positions plus an optional index buffer.
///
/// Without indices every three consecutive positions form a triangle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Expands the geometry into world-space triangles.
    pub fn triangles(&self, world: &Mat4) -> Result<Vec<Triangle>> {
        let corners = match &self.indices {
            Some(indices) => self.resolve_indices(indices)?,
            None => {
                if self.positions.len() % 3 != 0 {
                    return Err(BvhError::IncompleteTriangle {
                        len: self.positions.len(),
                    });
                }
                self.positions.clone()
            }
        };

        Ok(corners
            .chunks_exact(3)
            .map(|c| {
                Triangle::new(
                    world.transform_point3(c[0]),
                    world.transform_point3(c[1]),
                    world.transform_point3(c[2]),
                )
            })
            .collect())
    }

    fn resolve_indices(&self, indices: &[u32]) -> Result<Vec<Vec3>> {
        if indices.len() % 3 != 0 {
            return Err(BvhError::IncompleteTriangle { len: indices.len() });
        }
        indices
            .iter()
            .map(|&index| {
                self.positions
                    .get(index as usize)
                    .copied()
                    .ok_or(BvhError::IndexOutOfRange {
                        index,
                        vertex_count: self.positions.len(),
                    })
            })
            .collect()
    }
}
