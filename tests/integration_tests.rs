mod common;

use approx::assert_abs_diff_eq;
use capsule_bvh::*;
use common::floor_grid;

#[test]
fn test_falling_character_comes_to_rest_on_floor() {
    let bvh = Bvh::build(floor_grid(8, 4.0));
    let mut capsule = Capsule::upright(Vec3::new(1.0, 1.0, 1.0), 2.0, 0.5);

    for _ in 0..30 {
        capsule.translate(Vec3::new(0.0, -0.1, 0.0));
        if let Some(res) = bvh.capsule_intersect(&capsule) {
            capsule.translate(res.translation());
        }
    }

    assert_abs_diff_eq!(capsule.start.y, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(capsule.start.x, 1.0, epsilon = 1e-6);
}

#[test]
fn test_character_slides_along_wall() {
    // Floor plus a wall on x = 6 facing -X.
    let mut triangles = floor_grid(4, 4.0);
    triangles.push(Triangle::new(
        Vec3::new(6.0, -1.0, -1.0),
        Vec3::new(6.0, 5.0, 20.0),
        Vec3::new(6.0, 5.0, -1.0),
    ));
    triangles.push(Triangle::new(
        Vec3::new(6.0, -1.0, -1.0),
        Vec3::new(6.0, -1.0, 20.0),
        Vec3::new(6.0, 5.0, 20.0),
    ));
    let bvh = Bvh::build(triangles);
    assert!(bvh.triangles().iter().any(|t| t.normal().x < -0.99));

    let mut capsule = Capsule::upright(Vec3::new(5.0, 0.6, 1.0), 2.0, 0.5);
    for _ in 0..20 {
        capsule.translate(Vec3::new(0.1, 0.0, 0.1));
        if let Some(res) = bvh.capsule_intersect(&capsule) {
            capsule.translate(res.translation());
        }
    }

    assert!(capsule.start.x <= 5.5 + 1e-3, "capsule went through the wall: {:?}", capsule);
    assert!(capsule.start.z > 2.5, "capsule should keep sliding along z");
}
