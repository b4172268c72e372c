use capsule_bvh::*;

fn main() {
    // 10x10 floor of unit cells on y = 0.
    let mut triangles = Vec::new();
    for z in 0..10 {
        for x in 0..10 {
            let a = Vec3::new(x as f32, 0.0, z as f32);
            let b = a + Vec3::X;
            let c = a + Vec3::Z;
            triangles.push(Triangle::new(a, c, b));
            triangles.push(Triangle::new(b, c, a + Vec3::X + Vec3::Z));
        }
    }

    let bvh = Bvh::build(triangles);
    let stats = bvh.stats();
    println!(
        "BVH: {} triangles, {} nodes, {} leaves, depth {}",
        stats.triangle_count, stats.node_count, stats.leaf_count, stats.max_depth
    );

    let mut capsule = Capsule::upright(Vec3::new(4.3, 2.0, 5.6), 1.8, 0.4);
    for step in 0..25 {
        capsule.translate(Vec3::new(0.0, -0.1, 0.0));
        if let Some(res) = bvh.capsule_intersect(&capsule) {
            capsule.translate(res.translation());
            println!(
                "step {step:2}: {} contact(s), pushed {:.3} along {:?}",
                res.contact_count, res.depth, res.normal
            );
        }
    }
    println!("Resting feet height: {:.3}", capsule.start.y - capsule.radius);
}
