//! Additional math helpers layered on top of `glam`.

use glam::Vec3;

use crate::{
    config::{SegmentClamp, PARALLEL_EPSILON, PARALLEL_RELATIVE_EPSILON},
    core::types::Segment,
};

/// Closest points between two segments with their segment parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoints {
    pub point_a: Vec3,
    pub point_b: Vec3,
    /// Parameter along the first segment, in `[0, 1]`.
    pub s: f32,
    /// Parameter along the second segment, in `[0, 1]`.
    pub t: f32,
}

impl ClosestPoints {
    pub fn distance_squared(&self) -> f32 {
        self.point_a.distance_squared(self.point_b)
    }
}

/// Closest points between `seg_a` and `seg_b`.
///
/// [`SegmentClamp::SinglePass`] solves the unconstrained pair and clamps both
/// parameters once. For some configurations (notably overlapping parallel
/// segments) this is not the true minimum and may under-report contact depth.
/// [`SegmentClamp::Refined`] re-solves each parameter after clamping the other.
pub fn segment_closest_points(seg_a: &Segment, seg_b: &Segment, mode: SegmentClamp) -> ClosestPoints {
    let r = seg_a.delta();
    let s = seg_b.delta();
    let w = seg_a.start - seg_b.start;

    let a = r.dot(r);
    let b = r.dot(s);
    let c = s.dot(s);
    let d = r.dot(w);
    let e = s.dot(w);

    let (sc, tc) = match mode {
        SegmentClamp::SinglePass => single_pass(a, b, c, d, e),
        SegmentClamp::Refined => refined(a, b, c, d, e),
    };

    ClosestPoints {
        point_a: seg_a.start + r * sc,
        point_b: seg_b.start + s * tc,
        s: sc,
        t: tc,
    }
}

/// True when `denom = a c - b²` is within rounding noise of zero. Also holds
/// for zero-length segments, where both sides are zero.
fn is_parallel(a: f32, c: f32, denom: f32) -> bool {
    denom <= PARALLEL_RELATIVE_EPSILON * a * c
}

fn single_pass(a: f32, b: f32, c: f32, d: f32, e: f32) -> (f32, f32) {
    let denom = a * c - b * b;

    let (sc, tc) = if is_parallel(a, c, denom) {
        // Near-parallel: pin the first segment at its start and take the
        // ratio from whichever of b, c is less degenerate.
        let (num, div) = if b > c { (d, b) } else { (e, c) };
        let tc = if div.abs() < PARALLEL_EPSILON {
            0.0
        } else {
            num / div
        };
        (0.0, tc)
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    (sc.clamp(0.0, 1.0), tc.clamp(0.0, 1.0))
}

fn refined(a: f32, b: f32, c: f32, d: f32, e: f32) -> (f32, f32) {
    if a < PARALLEL_EPSILON && c < PARALLEL_EPSILON {
        return (0.0, 0.0);
    }
    if a < PARALLEL_EPSILON {
        return (0.0, (e / c).clamp(0.0, 1.0));
    }
    if c < PARALLEL_EPSILON {
        return ((-d / a).clamp(0.0, 1.0), 0.0);
    }

    let denom = a * c - b * b;
    let mut sc = if is_parallel(a, c, denom) {
        0.0
    } else {
        ((b * e - c * d) / denom).clamp(0.0, 1.0)
    };

    let mut tc = (b * sc + e) / c;
    if tc < 0.0 {
        tc = 0.0;
        sc = (-d / a).clamp(0.0, 1.0);
    } else if tc > 1.0 {
        tc = 1.0;
        sc = ((b - d) / a).clamp(0.0, 1.0);
    }

    (sc, tc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn crossing_segments_meet_at_midpoints() {
        let a = Segment::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let b = Segment::new(Vec3::new(0.0, -1.0, 1.0), Vec3::new(0.0, 1.0, 1.0));

        let cp = segment_closest_points(&a, &b, SegmentClamp::SinglePass);
        assert_abs_diff_eq!(cp.s, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(cp.t, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(cp.point_a.length(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cp.point_b.distance(Vec3::Z), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cp.distance_squared(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn parameters_are_clamped_to_segment() {
        let a = Segment::new(Vec3::ZERO, Vec3::X);
        let b = Segment::new(Vec3::new(3.0, -1.0, 0.0), Vec3::new(3.0, 1.0, 0.0));

        let cp = segment_closest_points(&a, &b, SegmentClamp::SinglePass);
        assert_eq!(cp.s, 1.0);
        assert_abs_diff_eq!(cp.t, 0.5, epsilon = 1e-6);
        assert_eq!(cp.point_a, Vec3::X);
    }

    #[test]
    fn collinear_overlap_pins_first_parameter() {
        let a = Segment::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let b = Segment::new(Vec3::X, Vec3::new(3.0, 0.0, 0.0));

        let cp = segment_closest_points(&a, &b, SegmentClamp::SinglePass);
        assert_eq!(cp.s, 0.0);
        assert!((0.0..=1.0).contains(&cp.t));
    }

    fn offset_parallel_pair(dir: Vec3) -> (Segment, Segment) {
        let side = dir.any_orthonormal_vector() * 0.1;
        let a = Segment::new(Vec3::ZERO, dir);
        let b = Segment::new(side - dir * 0.4, side + dir * 0.6);
        (a, b)
    }

    #[test]
    fn tilted_parallel_segments_take_parallel_branch() {
        let dir = Vec3::new(0.37, 0.77, 0.22).normalize();
        let (a, b) = offset_parallel_pair(dir);

        let cp = segment_closest_points(&a, &b, SegmentClamp::SinglePass);
        assert_eq!(cp.s, 0.0);
        assert_abs_diff_eq!(cp.t, 0.4, epsilon = 1e-5);
        assert_abs_diff_eq!(cp.distance_squared().sqrt(), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn parallel_result_is_stable_across_directions() {
        for i in 0..200 {
            let i = i as f32;
            let dir = Vec3::new(0.31 + 0.013 * i, 0.77, 0.19 + 0.007 * i).normalize();
            let (a, b) = offset_parallel_pair(dir);

            for mode in [SegmentClamp::SinglePass, SegmentClamp::Refined] {
                let cp = segment_closest_points(&a, &b, mode);
                assert_eq!(cp.s, 0.0, "direction {dir:?}");
                assert_abs_diff_eq!(cp.distance_squared().sqrt(), 0.1, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn refined_mode_finds_true_overlap() {
        let a = Segment::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let b = Segment::new(Vec3::X, Vec3::new(3.0, 0.0, 0.0));

        let single = segment_closest_points(&a, &b, SegmentClamp::SinglePass);
        let refined = segment_closest_points(&a, &b, SegmentClamp::Refined);
        assert!(single.distance_squared() > 0.5);
        assert_abs_diff_eq!(refined.distance_squared(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_length_segment_is_a_point() {
        let edge = Segment::new(Vec3::new(0.5, 1.0, 0.0), Vec3::new(0.5, 1.0, 0.0));
        let axis = Segment::new(Vec3::ZERO, Vec3::X);

        for mode in [SegmentClamp::SinglePass, SegmentClamp::Refined] {
            let cp = segment_closest_points(&axis, &edge, mode);
            assert!(cp.s.is_finite() && cp.t.is_finite());
            assert_eq!(cp.point_b, edge.start);
        }
    }

    #[test]
    fn point_sphere_against_edge_projects() {
        let sphere = Segment::new(Vec3::new(0.25, 1.0, 0.0), Vec3::new(0.25, 1.0, 0.0));
        let edge = Segment::new(Vec3::ZERO, Vec3::X);

        let cp = segment_closest_points(&sphere, &edge, SegmentClamp::SinglePass);
        assert_abs_diff_eq!(cp.t, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(cp.point_b.x, 0.25, epsilon = 1e-6);
    }
}
