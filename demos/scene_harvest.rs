use capsule_bvh::*;

const WALKABLE: u32 = 0;
const DECORATION: u32 = 4;

fn quad() -> Geometry {
    Geometry::indexed(
        vec![
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
        vec![0, 2, 1, 1, 2, 3],
    )
}

fn main() {
    let ground = SceneNode::mesh(
        Transform {
            scale: Vec3::new(20.0, 1.0, 20.0),
            ..Transform::default()
        },
        quad(),
        Layers::only(WALKABLE),
    );
    let ramp = SceneNode::mesh(
        Transform {
            position: Vec3::new(5.0, 1.0, 0.0),
            rotation: Quat::from_rotation_z(0.3),
            scale: Vec3::new(3.0, 1.0, 2.0),
        },
        quad(),
        Layers::only(WALKABLE),
    );
    let banner = SceneNode::mesh(
        Transform::from_position(Vec3::new(0.0, 3.0, 0.0)),
        quad(),
        Layers::only(DECORATION),
    );

    let level = SceneNode::group(Transform::from_position(Vec3::new(0.0, -0.5, 0.0)))
        .with_child(ground)
        .with_child(ramp)
        .with_child(banner);

    let world = CollisionWorld::default();
    if let Err(err) = world.rebuild_from_scene(&level, &Layers::only(WALKABLE)) {
        eprintln!("Failed to harvest level: {err}");
        return;
    }

    let bvh = world.snapshot();
    println!(
        "Harvested {} walkable triangles, bounds {:?}",
        bvh.triangles().len(),
        bvh.bounds()
    );

    let capsules: Vec<Capsule> = (0..8)
        .map(|i| Capsule::upright(Vec3::new(i as f32 - 1.0, -0.7, 0.2), 1.8, 0.4))
        .collect();
    for (capsule, res) in capsules.iter().zip(world.capsule_intersect_batch(&capsules)) {
        match res {
            Some(res) => println!(
                "capsule at x={:+.1}: push {:.3} along {:?}",
                capsule.start.x, res.depth, res.normal
            ),
            None => println!("capsule at x={:+.1}: clear", capsule.start.x),
        }
    }
}
