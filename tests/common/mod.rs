#![allow(dead_code)]

use capsule_bvh::{Triangle, Vec3};

/// Flat floor on y = 0 made of `resolution²` cells of size `cell`, normals up.
pub fn floor_grid(resolution: usize, cell: f32) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(resolution * resolution * 2);
    for z in 0..resolution {
        for x in 0..resolution {
            let x0 = x as f32 * cell;
            let z0 = z as f32 * cell;
            let a = Vec3::new(x0, 0.0, z0);
            let b = Vec3::new(x0 + cell, 0.0, z0);
            let c = Vec3::new(x0, 0.0, z0 + cell);
            let d = Vec3::new(x0 + cell, 0.0, z0 + cell);
            triangles.push(Triangle::new(a, c, b));
            triangles.push(Triangle::new(b, c, d));
        }
    }
    triangles
}

/// Small triangles scattered along a line so every split is well defined.
pub fn strip_along(axis: Vec3, count: usize) -> Vec<Triangle> {
    (0..count)
        .map(|i| {
            let base = axis * (i as f32 * 2.0);
            Triangle::new(base, base + Vec3::new(0.5, 0.0, 0.0), base + Vec3::new(0.0, 0.5, 0.0))
        })
        .collect()
}
