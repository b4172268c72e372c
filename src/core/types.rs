use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::mesh::Aabb;

/// Position, orientation, and non-uniform scale of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builds a homogeneous matrix representation of the transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Infinite plane `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Signed distance, positive on the side the normal points to.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// Bounded line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.start.lerp(self.end, t)
    }
}

/// World-space triangle. Zero-area triangles are accepted but produce
/// meaningless planes; callers are expected to filter them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unit normal following counter-clockwise winding of `a, b, c`.
    pub fn normal(&self) -> Vec3 {
        (self.c - self.b).cross(self.a - self.b).normalize_or_zero()
    }

    pub fn plane(&self) -> Plane {
        Plane::from_normal_and_point(self.normal(), self.a)
    }

    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b, self.c])
    }

    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.c, self.a),
        ]
    }

    /// Barycentric coordinates of `point` projected onto the triangle plane,
    /// or `None` when the triangle is degenerate.
    pub fn barycentric(&self, point: Vec3) -> Option<Vec3> {
        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = point - self.a;

        let dot00 = v0.dot(v0);
        let dot01 = v0.dot(v1);
        let dot02 = v0.dot(v2);
        let dot11 = v1.dot(v1);
        let dot12 = v1.dot(v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom == 0.0 {
            return None;
        }

        let inv = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv;
        let v = (dot00 * dot12 - dot01 * dot02) * inv;
        Some(Vec3::new(1.0 - u - v, v, u))
    }

    /// Point-in-triangle test on the plane projection; edges count as inside.
    pub fn contains_point(&self, point: Vec3) -> bool {
        match self.barycentric(point) {
            Some(bary) => bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0,
            None => false,
        }
    }
}

/// Swept sphere along `start..end`. The radius is expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Default for Capsule {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            end: Vec3::Y,
            radius: 0.5,
        }
    }
}

impl Capsule {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Upright capsule for a character whose feet rest at `base`.
    pub fn upright(base: Vec3, height: f32, radius: f32) -> Self {
        let segment = (height - 2.0 * radius).max(0.0);
        let start = base + Vec3::Y * radius;
        Self {
            start,
            end: start + Vec3::Y * segment,
            radius,
        }
    }

    pub fn axis(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }

    pub fn translated(mut self, offset: Vec3) -> Self {
        self.translate(offset);
        self
    }

    /// Box enclosing the whole swept sphere.
    pub fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(self.start.min(self.end) - r, self.start.max(self.end) + r)
    }

    /// Conservative overlap test against a box, checked on each pair of
    /// axes. Touching within exactly `radius` does not count.
    pub fn intersects_aabb(&self, bounds: &Aabb) -> bool {
        let (s, e, r) = (self.start, self.end, self.radius);
        let (min, max) = (bounds.min, bounds.max);
        check_axis_pair(s.x, s.y, e.x, e.y, min.x, max.x, min.y, max.y, r)
            && check_axis_pair(s.x, s.z, e.x, e.z, min.x, max.x, min.z, max.z, r)
            && check_axis_pair(s.y, s.z, e.y, e.z, min.y, max.y, min.z, max.z, r)
    }
}

#[allow(clippy::too_many_arguments)]
fn check_axis_pair(
    p1x: f32,
    p1y: f32,
    p2x: f32,
    p2y: f32,
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    radius: f32,
) -> bool {
    (min_x - p1x < radius || min_x - p2x < radius)
        && (p1x - max_x < radius || p2x - max_x < radius)
        && (min_y - p1y < radius || min_y - p2y < radius)
        && (p1y - max_y < radius || p2y - max_y < radius)
}
