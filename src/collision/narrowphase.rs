use glam::Vec3;

use crate::{
    collision::contact::{Contact, ContactKind},
    config::{SegmentClamp, PARALLEL_EPSILON},
    core::types::{Capsule, Triangle},
    utils::math::segment_closest_points,
};

/// Capsule against a single triangle: face test first, then the three edges.
pub struct TriangleCapsuleTest;

impl TriangleCapsuleTest {
    pub fn intersect(capsule: &Capsule, triangle: &Triangle) -> Option<Contact> {
        Self::intersect_with(capsule, triangle, SegmentClamp::SinglePass)
    }

    pub fn intersect_with(
        capsule: &Capsule,
        triangle: &Triangle,
        clamp: SegmentClamp,
    ) -> Option<Contact> {
        let plane = triangle.plane();
        let radius = capsule.radius;

        let d1 = plane.distance_to_point(capsule.start) - radius;
        let d2 = plane.distance_to_point(capsule.end) - radius;

        if (d1 > 0.0 && d2 > 0.0) || (d1 < -radius && d2 < -radius) {
            return None;
        }

        if let Some(contact) = Self::face_contact(capsule, triangle, plane.normal, d1, d2) {
            return Some(contact);
        }

        Self::edge_contact(capsule, triangle, plane.normal, clamp)
    }

    fn face_contact(
        capsule: &Capsule,
        triangle: &Triangle,
        normal: Vec3,
        d1: f32,
        d2: f32,
    ) -> Option<Contact> {
        let total = d1.abs() + d2.abs();
        let delta = if total < PARALLEL_EPSILON {
            0.5
        } else {
            d1.abs() / total
        };
        let crossing = capsule.start.lerp(capsule.end, delta);

        triangle.contains_point(crossing).then(|| Contact {
            normal,
            point: crossing,
            depth: d1.abs().min(d2.abs()),
            kind: ContactKind::Face,
        })
    }

    fn edge_contact(
        capsule: &Capsule,
        triangle: &Triangle,
        face_normal: Vec3,
        clamp: SegmentClamp,
    ) -> Option<Contact> {
        let radius_sq = capsule.radius * capsule.radius;
        let axis = capsule.axis();

        triangle.edges().iter().find_map(|edge| {
            let closest = segment_closest_points(&axis, edge, clamp);
            let dist_sq = closest.distance_squared();
            if dist_sq >= radius_sq {
                return None;
            }

            // Axis passing exactly through the edge has no direction of its own.
            let normal = (closest.point_a - closest.point_b)
                .try_normalize()
                .unwrap_or(face_normal);

            Some(Contact {
                normal,
                point: closest.point_b,
                depth: capsule.radius - dist_sq.sqrt(),
                kind: ContactKind::Edge,
            })
        })
    }
}
